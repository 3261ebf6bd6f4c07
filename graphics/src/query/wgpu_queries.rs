//! Query backend on wgpu query sets.
//!
//! Timer queries write timestamps from their own command encoders, so they
//! need `TIMESTAMP_QUERY` and `TIMESTAMP_QUERY_INSIDE_ENCODERS`. Occlusion
//! queries are attached by the caller to a render pass through
//! [`WgpuOcclusionQuery::occlusion_query_set`]. Results are resolved into a
//! buffer, copied to a staging buffer and mapped for readback.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Duration;

use crate::error::GraphicsError;

use super::{EventQuery, OcclusionQuery, QueryManager, QueryState, TimerQuery};

const WAIT_TIMEOUT: Duration = Duration::from_secs(10);

const MAP_PENDING: u8 = 0;
const MAP_OK: u8 = 1;
const MAP_FAILED: u8 = 2;

/// Query manager for the wgpu render system.
#[derive(Debug, Clone)]
pub struct WgpuQueryManager {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
}

impl WgpuQueryManager {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        Self { device, queue }
    }

    /// Features the device needs for timer queries.
    pub fn timer_features() -> wgpu::Features {
        wgpu::Features::TIMESTAMP_QUERY | wgpu::Features::TIMESTAMP_QUERY_INSIDE_ENCODERS
    }

    pub fn supports_timer_queries(&self) -> bool {
        self.device.features().contains(Self::timer_features())
    }

    /// Concrete timer query.
    pub fn create_wgpu_timer_query(&self) -> Result<WgpuTimerQuery, GraphicsError> {
        if !self.supports_timer_queries() {
            return Err(GraphicsError::FeatureNotSupported(
                "timer queries require TIMESTAMP_QUERY and TIMESTAMP_QUERY_INSIDE_ENCODERS".into(),
            ));
        }
        let query_set = self.device.create_query_set(&wgpu::QuerySetDescriptor {
            label: Some("Timer QuerySet"),
            ty: wgpu::QueryType::Timestamp,
            count: 2,
        });
        Ok(WgpuTimerQuery {
            readback: Readback::new(&self.device, "Timer", 2),
            device: Arc::clone(&self.device),
            queue: Arc::clone(&self.queue),
            query_set,
            period_ns: self.queue.get_timestamp_period(),
            state: QueryState::Idle,
            elapsed_ms: None,
        })
    }

    /// Concrete occlusion query, for attaching to render passes.
    pub fn create_wgpu_occlusion_query(&self, binary: bool) -> WgpuOcclusionQuery {
        let query_set = self.device.create_query_set(&wgpu::QuerySetDescriptor {
            label: Some("Occlusion QuerySet"),
            ty: wgpu::QueryType::Occlusion,
            count: 1,
        });
        WgpuOcclusionQuery {
            readback: Readback::new(&self.device, "Occlusion", 1),
            device: Arc::clone(&self.device),
            queue: Arc::clone(&self.queue),
            query_set,
            binary,
            state: QueryState::Idle,
            samples: None,
        }
    }
}

impl QueryManager for WgpuQueryManager {
    fn backend_name(&self) -> &str {
        "wgpu"
    }

    fn create_event_query(&self) -> Result<Box<dyn EventQuery>, GraphicsError> {
        Ok(Box::new(WgpuEventQuery {
            device: Arc::clone(&self.device),
            queue: Arc::clone(&self.queue),
            signaled: None,
        }))
    }

    fn create_timer_query(&self) -> Result<Box<dyn TimerQuery>, GraphicsError> {
        Ok(Box::new(self.create_wgpu_timer_query()?))
    }

    fn create_occlusion_query(
        &self,
        binary: bool,
    ) -> Result<Box<dyn OcclusionQuery>, GraphicsError> {
        Ok(Box::new(self.create_wgpu_occlusion_query(binary)))
    }
}

fn poll(device: &wgpu::Device, poll_type: wgpu::PollType) {
    if let Err(e) = device.poll(poll_type) {
        log::warn!("Device poll failed: {e}");
    }
}

/// Result of polling a readback once.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Readout {
    Pending,
    Values(Vec<u64>),
    Failed,
}

/// Next state and result of a query after one readback poll. A failed
/// readback yields no result and returns the query to idle.
fn settle<T>(readout: Readout, convert: impl FnOnce(&[u64]) -> Option<T>) -> (QueryState, Option<T>) {
    match readout {
        Readout::Pending => (QueryState::Pending, None),
        Readout::Values(values) => (QueryState::Ready, convert(&values)),
        Readout::Failed => {
            log::warn!("Query readback failed, result discarded");
            (QueryState::Idle, None)
        }
    }
}

fn elapsed_ms(timestamps: &[u64], period_ns: f32) -> Option<f64> {
    match *timestamps {
        [start, end] => {
            let ticks = end.saturating_sub(start);
            Some(ticks as f64 * f64::from(period_ns) / 1_000_000.0)
        }
        _ => None,
    }
}

fn sample_count(values: &[u64], binary: bool) -> Option<u64> {
    let count = *values.first()?;
    Some(if binary { count.min(1) } else { count })
}

/// Resolve and staging buffers for one query set.
#[derive(Debug)]
struct Readback {
    resolve: wgpu::Buffer,
    staging: wgpu::Buffer,
    map_state: Arc<AtomicU8>,
    count: u32,
    pending: bool,
}

impl Readback {
    fn new(device: &wgpu::Device, label: &str, count: u32) -> Self {
        let size = u64::from(count) * wgpu::QUERY_SIZE as u64;
        let resolve = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Query Resolve Buffer")),
            size,
            usage: wgpu::BufferUsages::QUERY_RESOLVE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Query Staging Buffer")),
            size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            resolve,
            staging,
            map_state: Arc::new(AtomicU8::new(MAP_PENDING)),
            count,
            pending: false,
        }
    }

    fn size(&self) -> u64 {
        u64::from(self.count) * wgpu::QUERY_SIZE as u64
    }

    fn encode(&self, encoder: &mut wgpu::CommandEncoder, query_set: &wgpu::QuerySet) {
        encoder.resolve_query_set(query_set, 0..self.count, &self.resolve, 0);
        encoder.copy_buffer_to_buffer(&self.resolve, 0, &self.staging, 0, self.size());
    }

    /// Must be called after the encoded copy was submitted.
    fn map(&mut self) {
        let state = Arc::clone(&self.map_state);
        state.store(MAP_PENDING, Ordering::SeqCst);
        self.staging
            .slice(..)
            .map_async(wgpu::MapMode::Read, move |result| match result {
                Ok(()) => state.store(MAP_OK, Ordering::SeqCst),
                Err(e) => {
                    log::error!("Query readback map_async failed: {e:?}");
                    state.store(MAP_FAILED, Ordering::SeqCst);
                }
            });
        self.pending = true;
    }

    fn try_read(&mut self, device: &wgpu::Device) -> Readout {
        if !self.pending {
            return Readout::Pending;
        }
        poll(device, wgpu::PollType::Poll);
        match self.map_state.load(Ordering::SeqCst) {
            MAP_OK => {
                let data = self.staging.slice(..).get_mapped_range();
                let values = data
                    .chunks_exact(wgpu::QUERY_SIZE as usize)
                    .map(bytemuck::pod_read_unaligned::<u64>)
                    .collect();
                drop(data);
                self.staging.unmap();
                self.pending = false;
                Readout::Values(values)
            }
            MAP_FAILED => {
                self.pending = false;
                Readout::Failed
            }
            _ => Readout::Pending,
        }
    }

    fn wait(&mut self, device: &wgpu::Device) -> Readout {
        if !self.pending {
            return Readout::Pending;
        }
        poll(
            device,
            wgpu::PollType::Wait {
                submission_index: None,
                timeout: Some(WAIT_TIMEOUT),
            },
        );
        self.try_read(device)
    }

    /// Drop any in-flight result.
    fn discard(&mut self) {
        if self.pending {
            self.staging.unmap();
            self.pending = false;
        }
    }
}

impl Drop for Readback {
    fn drop(&mut self) {
        self.discard();
    }
}

/// Event query signalled by `Queue::on_submitted_work_done`.
#[derive(Debug)]
pub struct WgpuEventQuery {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    signaled: Option<Arc<AtomicBool>>,
}

impl EventQuery for WgpuEventQuery {
    fn issue(&mut self) {
        let flag = Arc::new(AtomicBool::new(false));
        let signal = Arc::clone(&flag);
        self.queue
            .on_submitted_work_done(move || signal.store(true, Ordering::SeqCst));
        self.signaled = Some(flag);
        log::trace!("Event query issued");
    }

    fn is_ready(&mut self) -> bool {
        let Some(flag) = &self.signaled else {
            return false;
        };
        poll(&self.device, wgpu::PollType::Poll);
        flag.load(Ordering::SeqCst)
    }

    fn wait(&mut self) {
        if self.signaled.is_some() {
            poll(&self.device, wgpu::PollType::wait_indefinitely());
        }
    }
}

/// Timer query on a two-entry timestamp query set.
#[derive(Debug)]
pub struct WgpuTimerQuery {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    query_set: wgpu::QuerySet,
    readback: Readback,
    period_ns: f32,
    state: QueryState,
    elapsed_ms: Option<f64>,
}

impl WgpuTimerQuery {
    fn write_timestamp(&self, index: u32, resolve: bool) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Timer Query Encoder"),
            });
        encoder.write_timestamp(&self.query_set, index);
        if resolve {
            self.readback.encode(&mut encoder, &self.query_set);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    fn settle(&mut self, readout: Readout) {
        let period_ns = self.period_ns;
        let (state, elapsed) = settle(readout, |t| elapsed_ms(t, period_ns));
        self.state = state;
        self.elapsed_ms = elapsed;
    }
}

impl TimerQuery for WgpuTimerQuery {
    fn begin(&mut self) {
        self.readback.discard();
        self.elapsed_ms = None;
        self.write_timestamp(0, false);
        self.state = QueryState::Running;
    }

    fn end(&mut self) {
        if self.state != QueryState::Running {
            log::warn!("Timer query ended without begin");
            return;
        }
        self.write_timestamp(1, true);
        self.readback.map();
        self.state = QueryState::Pending;
        log::trace!("Timer query submitted");
    }

    fn is_ready(&mut self) -> bool {
        if self.state == QueryState::Pending {
            let readout = self.readback.try_read(&self.device);
            self.settle(readout);
        }
        self.state == QueryState::Ready
    }

    fn wait(&mut self) {
        if self.state == QueryState::Pending {
            let readout = self.readback.wait(&self.device);
            self.settle(readout);
        }
    }

    fn time_ms(&self) -> Option<f64> {
        self.elapsed_ms
    }
}

/// Occlusion query on a one-entry occlusion query set.
///
/// Attach [`occlusion_query_set`](Self::occlusion_query_set) to the render
/// pass descriptor and bracket draws with [`record_begin`](Self::record_begin)
/// and [`record_end`](Self::record_end). Call `end` after the pass has been
/// submitted.
#[derive(Debug)]
pub struct WgpuOcclusionQuery {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    query_set: wgpu::QuerySet,
    readback: Readback,
    binary: bool,
    state: QueryState,
    samples: Option<u64>,
}

impl WgpuOcclusionQuery {
    pub fn occlusion_query_set(&self) -> &wgpu::QuerySet {
        &self.query_set
    }

    pub fn record_begin(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.begin_occlusion_query(0);
    }

    pub fn record_end(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.end_occlusion_query();
    }

    fn settle(&mut self, readout: Readout) {
        let binary = self.binary;
        let (state, samples) = settle(readout, |v| sample_count(v, binary));
        self.state = state;
        self.samples = samples;
    }
}

impl OcclusionQuery for WgpuOcclusionQuery {
    fn begin(&mut self) {
        self.readback.discard();
        self.samples = None;
        self.state = QueryState::Running;
    }

    fn end(&mut self) {
        if self.state != QueryState::Running {
            log::warn!("Occlusion query ended without begin");
            return;
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Occlusion Query Encoder"),
            });
        self.readback.encode(&mut encoder, &self.query_set);
        self.queue.submit(std::iter::once(encoder.finish()));
        self.readback.map();
        self.state = QueryState::Pending;
        log::trace!("Occlusion query submitted");
    }

    fn is_ready(&mut self) -> bool {
        if self.state == QueryState::Pending {
            let readout = self.readback.try_read(&self.device);
            self.settle(readout);
        }
        self.state == QueryState::Ready
    }

    fn wait(&mut self) {
        if self.state == QueryState::Pending {
            let readout = self.readback.wait(&self.device);
            self.settle(readout);
        }
    }

    fn num_samples(&self) -> Option<u64> {
        self.samples
    }

    fn is_binary(&self) -> bool {
        self.binary
    }
}
