//! Active render-system registry.
//!
//! A [`RenderSystem`] is brought up once at application start-up. It names
//! the active backend, which together with the renderer name forms the
//! [`RenderSystemKey`] techniques are matched against, and it owns the
//! backend's [`QueryManager`]. Shutting it down releases both.
//!
//! # Example
//!
//! ```
//! use camelot_graphics::render_system::{BackendType, RenderSystem, RenderSystemParameters};
//!
//! let render_system =
//!     RenderSystem::start_up(RenderSystemParameters::default().with_backend(BackendType::Dummy))
//!         .unwrap();
//! assert_eq!(render_system.name(), "DummyRenderSystem");
//! render_system.shut_down();
//! ```

mod params;
#[cfg(feature = "wgpu-backend")]
mod wgpu_context;

pub use params::{BackendType, PowerPreference, RenderSystemParameters, WgpuBackendType};
#[cfg(feature = "wgpu-backend")]
pub use wgpu_context::WgpuContext;

use std::fmt;

use crate::error::GraphicsError;
use crate::query::{DummyQueryManager, QueryManager};

/// Name of the always-available dummy render system.
pub const DUMMY_RENDER_SYSTEM: &str = "DummyRenderSystem";

/// `(render system, renderer)` pair a technique targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderSystemKey {
    render_system: String,
    renderer: String,
}

impl RenderSystemKey {
    pub fn new(render_system: impl Into<String>, renderer: impl Into<String>) -> Self {
        Self {
            render_system: render_system.into(),
            renderer: renderer.into(),
        }
    }

    pub fn render_system(&self) -> &str {
        &self.render_system
    }

    pub fn renderer(&self) -> &str {
        &self.renderer
    }
}

impl fmt::Display for RenderSystemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.render_system, self.renderer)
    }
}

/// The active backend and its query manager.
pub struct RenderSystem {
    key: RenderSystemKey,
    query_manager: Box<dyn QueryManager>,
    #[cfg(feature = "wgpu-backend")]
    wgpu: Option<WgpuContext>,
}

impl RenderSystem {
    /// Bring up the backend selected by `params`.
    ///
    /// # Errors
    ///
    /// With [`BackendType::Wgpu`], returns the bring-up error. With
    /// [`BackendType::Auto`] a wgpu failure falls back to the dummy backend.
    pub fn start_up(params: RenderSystemParameters) -> Result<Self, GraphicsError> {
        log::info!("Starting render system ({:?})", params.backend);

        let render_system = match params.backend {
            BackendType::Dummy => Self::dummy(&params.renderer),
            BackendType::Wgpu => Self::wgpu(&params)?,
            BackendType::Auto => match Self::wgpu(&params) {
                Ok(render_system) => render_system,
                Err(e) => {
                    log::warn!("Failed to create wgpu render system: {e}");
                    Self::dummy(&params.renderer)
                }
            },
        };

        log::info!(
            "Using render system: {} (queries: {})",
            render_system.key,
            render_system.query_manager.backend_name()
        );
        Ok(render_system)
    }

    /// Register an externally provided backend.
    pub fn with_query_manager(
        name: impl Into<String>,
        renderer: impl Into<String>,
        query_manager: Box<dyn QueryManager>,
    ) -> Self {
        let render_system = Self {
            key: RenderSystemKey::new(name, renderer),
            query_manager,
            #[cfg(feature = "wgpu-backend")]
            wgpu: None,
        };
        log::info!("Using render system: {}", render_system.key);
        render_system
    }

    fn dummy(renderer: &str) -> Self {
        Self {
            key: RenderSystemKey::new(DUMMY_RENDER_SYSTEM, renderer),
            query_manager: Box::new(DummyQueryManager::new()),
            #[cfg(feature = "wgpu-backend")]
            wgpu: None,
        }
    }

    #[cfg(feature = "wgpu-backend")]
    fn wgpu(params: &RenderSystemParameters) -> Result<Self, GraphicsError> {
        let context = WgpuContext::new(params)?;
        Ok(Self {
            key: RenderSystemKey::new(context.render_system_name(), params.renderer.as_str()),
            query_manager: Box::new(context.query_manager()),
            wgpu: Some(context),
        })
    }

    #[cfg(not(feature = "wgpu-backend"))]
    fn wgpu(_params: &RenderSystemParameters) -> Result<Self, GraphicsError> {
        Err(GraphicsError::FeatureNotSupported(
            "wgpu render system (feature `wgpu-backend` disabled)".into(),
        ))
    }

    pub fn name(&self) -> &str {
        self.key.render_system()
    }

    pub fn renderer(&self) -> &str {
        self.key.renderer()
    }

    /// Key consulted by technique resolution.
    pub fn key(&self) -> &RenderSystemKey {
        &self.key
    }

    pub fn query_manager(&self) -> &dyn QueryManager {
        self.query_manager.as_ref()
    }

    /// The wgpu context, when this is a wgpu render system.
    #[cfg(feature = "wgpu-backend")]
    pub fn wgpu_context(&self) -> Option<&WgpuContext> {
        self.wgpu.as_ref()
    }

    pub fn shut_down(self) {
        log::info!("Shutting down render system: {}", self.key);
    }
}

impl fmt::Debug for RenderSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderSystem")
            .field("key", &self.key)
            .field("queries", &self.query_manager.backend_name())
            .finish()
    }
}

static_assertions::assert_impl_all!(RenderSystem: Send, Sync);
