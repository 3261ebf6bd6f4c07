//! wgpu bring-up for the render system.

use std::sync::Arc;

use crate::error::GraphicsError;
use crate::query::WgpuQueryManager;

use super::params::{PowerPreference, RenderSystemParameters, WgpuBackendType};

/// Instance, adapter, device and queue of a wgpu render system.
pub struct WgpuContext {
    #[allow(dead_code)]
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
}

impl std::fmt::Debug for WgpuContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuContext")
            .field("adapter", &self.adapter.get_info().name)
            .finish()
    }
}

impl WgpuContext {
    pub fn new(params: &RenderSystemParameters) -> Result<Self, GraphicsError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: convert_backends(params.wgpu_backend),
            flags: wgpu::InstanceFlags::default(),
            backend_options: wgpu::BackendOptions::default(),
            memory_budget_thresholds: wgpu::MemoryBudgetThresholds::default(),
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: convert_power_preference(params.power_preference),
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .map_err(|e| GraphicsError::InitializationFailed(format!("No compatible GPU adapter: {e}")))?;

        log::info!("wgpu adapter: {:?}", adapter.get_info());

        // Timer queries are optional; request them only where available.
        let required_features = adapter.features() & WgpuQueryManager::timer_features();

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Camelot Device"),
            required_features,
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| GraphicsError::InitializationFailed(format!("Device creation failed: {e}")))?;

        Ok(Self {
            instance,
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    /// Render-system name derived from the adapter's native API.
    pub fn render_system_name(&self) -> &'static str {
        match self.adapter.get_info().backend {
            wgpu::Backend::Vulkan => "VulkanRenderSystem",
            wgpu::Backend::Metal => "MetalRenderSystem",
            wgpu::Backend::Dx12 => "D3D12RenderSystem",
            wgpu::Backend::Gl => "GLRenderSystem",
            wgpu::Backend::Noop => "DummyRenderSystem",
            _ => "WebGpuRenderSystem",
        }
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    pub fn device(&self) -> &Arc<wgpu::Device> {
        &self.device
    }

    pub fn queue(&self) -> &Arc<wgpu::Queue> {
        &self.queue
    }

    pub fn query_manager(&self) -> WgpuQueryManager {
        WgpuQueryManager::new(Arc::clone(&self.device), Arc::clone(&self.queue))
    }
}

fn convert_backends(backend: WgpuBackendType) -> wgpu::Backends {
    match backend {
        WgpuBackendType::Auto => wgpu::Backends::all(),
        WgpuBackendType::Vulkan => wgpu::Backends::VULKAN,
        WgpuBackendType::Metal => wgpu::Backends::METAL,
        WgpuBackendType::Dx12 => wgpu::Backends::DX12,
        WgpuBackendType::Gl => wgpu::Backends::GL,
    }
}

fn convert_power_preference(preference: PowerPreference) -> wgpu::PowerPreference {
    match preference {
        PowerPreference::HighPerformance => wgpu::PowerPreference::HighPerformance,
        PowerPreference::LowPower => wgpu::PowerPreference::LowPower,
    }
}
