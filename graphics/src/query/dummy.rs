//! CPU-only query backend.

use std::time::{Duration, Instant};

use crate::error::GraphicsError;

use super::{EventQuery, OcclusionQuery, QueryManager, QueryState, TimerQuery};

/// Query manager for the dummy render system.
///
/// Events signal as soon as they are issued, timers measure CPU wall time
/// and occlusion queries report a fixed sample count.
#[derive(Debug, Default)]
pub struct DummyQueryManager {
    occlusion_samples: u64,
}

impl DummyQueryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample count reported by occlusion queries created afterwards.
    #[must_use]
    pub fn with_occlusion_samples(mut self, samples: u64) -> Self {
        self.occlusion_samples = samples;
        self
    }

    pub fn occlusion_samples(&self) -> u64 {
        self.occlusion_samples
    }
}

impl QueryManager for DummyQueryManager {
    fn backend_name(&self) -> &str {
        "Dummy"
    }

    fn create_event_query(&self) -> Result<Box<dyn EventQuery>, GraphicsError> {
        Ok(Box::new(DummyEventQuery { issued: false }))
    }

    fn create_timer_query(&self) -> Result<Box<dyn TimerQuery>, GraphicsError> {
        Ok(Box::new(DummyTimerQuery::default()))
    }

    fn create_occlusion_query(
        &self,
        binary: bool,
    ) -> Result<Box<dyn OcclusionQuery>, GraphicsError> {
        Ok(Box::new(DummyOcclusionQuery {
            binary,
            samples: self.occlusion_samples,
            state: QueryState::Idle,
        }))
    }
}

#[derive(Debug)]
struct DummyEventQuery {
    issued: bool,
}

impl EventQuery for DummyEventQuery {
    fn issue(&mut self) {
        self.issued = true;
    }

    fn is_ready(&mut self) -> bool {
        self.issued
    }

    fn wait(&mut self) {}
}

#[derive(Debug, Default)]
struct DummyTimerQuery {
    started: Option<Instant>,
    elapsed: Option<Duration>,
}

impl TimerQuery for DummyTimerQuery {
    fn begin(&mut self) {
        self.started = Some(Instant::now());
        self.elapsed = None;
    }

    fn end(&mut self) {
        match self.started.take() {
            Some(started) => self.elapsed = Some(started.elapsed()),
            None => log::warn!("Timer query ended without begin"),
        }
    }

    fn is_ready(&mut self) -> bool {
        self.elapsed.is_some()
    }

    fn wait(&mut self) {}

    fn time_ms(&self) -> Option<f64> {
        self.elapsed.map(|d| d.as_secs_f64() * 1000.0)
    }
}

#[derive(Debug)]
struct DummyOcclusionQuery {
    binary: bool,
    samples: u64,
    state: QueryState,
}

impl OcclusionQuery for DummyOcclusionQuery {
    fn begin(&mut self) {
        self.state = QueryState::Running;
    }

    fn end(&mut self) {
        if self.state != QueryState::Running {
            log::warn!("Occlusion query ended without begin");
            return;
        }
        self.state = QueryState::Ready;
    }

    fn is_ready(&mut self) -> bool {
        self.state == QueryState::Ready
    }

    fn wait(&mut self) {}

    fn num_samples(&self) -> Option<u64> {
        if self.state != QueryState::Ready {
            return None;
        }
        Some(if self.binary {
            self.samples.min(1)
        } else {
            self.samples
        })
    }

    fn is_binary(&self) -> bool {
        self.binary
    }
}
