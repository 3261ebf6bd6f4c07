//! Render-system start-up configuration.

/// Which render system to bring up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackendType {
    /// Try wgpu, fall back to the dummy backend.
    #[default]
    Auto,
    Dummy,
    Wgpu,
}

/// Native API wgpu should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WgpuBackendType {
    #[default]
    Auto,
    Vulkan,
    Metal,
    Dx12,
    Gl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PowerPreference {
    #[default]
    HighPerformance,
    LowPower,
}

/// Parameters for [`RenderSystem::start_up`](super::RenderSystem::start_up).
///
/// # Example
///
/// ```
/// use camelot_graphics::render_system::{BackendType, RenderSystemParameters};
///
/// let params = RenderSystemParameters::default()
///     .with_backend(BackendType::Dummy)
///     .with_renderer("DeferredRenderer");
/// assert_eq!(params.renderer, "DeferredRenderer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSystemParameters {
    pub backend: BackendType,
    pub wgpu_backend: WgpuBackendType,
    /// Second half of the technique key.
    pub renderer: String,
    pub power_preference: PowerPreference,
}

impl Default for RenderSystemParameters {
    fn default() -> Self {
        Self {
            backend: BackendType::Auto,
            wgpu_backend: WgpuBackendType::Auto,
            renderer: "ForwardRenderer".to_string(),
            power_preference: PowerPreference::HighPerformance,
        }
    }
}

impl RenderSystemParameters {
    #[must_use]
    pub fn with_backend(mut self, backend: BackendType) -> Self {
        self.backend = backend;
        self
    }

    #[must_use]
    pub fn with_wgpu_backend(mut self, wgpu_backend: WgpuBackendType) -> Self {
        self.wgpu_backend = wgpu_backend;
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: impl Into<String>) -> Self {
        self.renderer = renderer.into();
        self
    }

    #[must_use]
    pub fn with_power_preference(mut self, power_preference: PowerPreference) -> Self {
        self.power_preference = power_preference;
        self
    }
}
