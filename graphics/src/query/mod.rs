//! Asynchronous GPU queries.
//!
//! A [`QueryManager`] is a stateless factory selected once per render system.
//! The query objects it creates own their polling protocol: a query is
//! submitted with `begin`/`end` (or `issue` for events), then polled with
//! `is_ready` or blocked on with `wait`. Results stay `None` until ready.
//! Dropping a pending query discards its result.
//!
//! Backends:
//! - [`DummyQueryManager`] - CPU-only results, always available
//! - `WgpuQueryManager` - timestamp and occlusion query sets (feature `wgpu-backend`)

mod dummy;
#[cfg(feature = "wgpu-backend")]
mod wgpu_queries;

pub use dummy::DummyQueryManager;
#[cfg(feature = "wgpu-backend")]
pub use wgpu_queries::{WgpuEventQuery, WgpuOcclusionQuery, WgpuQueryManager, WgpuTimerQuery};

use crate::error::GraphicsError;

/// Signals when all work submitted before [`issue`](EventQuery::issue) has
/// completed.
pub trait EventQuery: Send {
    /// Mark the current point in the submission stream.
    fn issue(&mut self);

    /// Non-blocking completion check. False until issued.
    fn is_ready(&mut self) -> bool;

    /// Block until the event has signalled. Returns at once if never issued.
    fn wait(&mut self);
}

/// Measures elapsed time between `begin` and `end`.
pub trait TimerQuery: Send {
    fn begin(&mut self);

    /// Close the measured range. Without a matching `begin` this is a
    /// no-op logged at `warn`.
    fn end(&mut self);

    fn is_ready(&mut self) -> bool;

    fn wait(&mut self);

    /// Elapsed milliseconds, once ready.
    fn time_ms(&self) -> Option<f64>;
}

/// Counts samples that passed depth testing between `begin` and `end`.
pub trait OcclusionQuery: Send {
    fn begin(&mut self);

    /// Close the counted range. Without a matching `begin` this is a no-op
    /// logged at `warn`.
    fn end(&mut self);

    fn is_ready(&mut self) -> bool;

    fn wait(&mut self);

    /// Passed sample count once ready. Binary queries report 0 or 1.
    fn num_samples(&self) -> Option<u64>;

    fn is_binary(&self) -> bool;
}

/// Backend factory for query objects.
pub trait QueryManager: Send + Sync {
    /// Name of the backend the queries run on.
    fn backend_name(&self) -> &str;

    fn create_event_query(&self) -> Result<Box<dyn EventQuery>, GraphicsError>;

    fn create_timer_query(&self) -> Result<Box<dyn TimerQuery>, GraphicsError>;

    /// A binary query only reports whether any sample passed.
    fn create_occlusion_query(&self, binary: bool)
    -> Result<Box<dyn OcclusionQuery>, GraphicsError>;
}

/// Lifecycle shared by timer and occlusion queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum QueryState {
    #[default]
    Idle,
    Running,
    Pending,
    Ready,
}
