//! # Camelot Graphics
//!
//! Material pipeline for the Camelot renderer.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`Material`] / [`Shader`] / [`Technique`] / [`Pass`] - the material tree,
//!   with techniques selected per active render system
//! - [`TextureBindingSlot`] - per-sampler texture frames, addressing, filtering,
//!   blending and UV animation, resolved lazily through a [`TextureCache`]
//! - [`ProgramManager`] - GPU program compilation and caching via `naga`
//! - [`RenderSystem`] - the active backend and its [`QueryManager`]
//! - Backends: wgpu and Dummy (for testing)
//!
//! ## Example
//!
//! ```ignore
//! use camelot_graphics::{Material, RenderSystem, RenderSystemParameters, Shader, TextureManager};
//!
//! let render_system = RenderSystem::start_up(RenderSystemParameters::default())?;
//! let textures = Arc::new(TextureManager::new());
//!
//! let mut shader = Shader::new("textured");
//! shader
//!     .add_technique(render_system.name(), render_system.renderer())
//!     .add_pass()
//!     .create_texture_slot("diffuse")
//!     .set_texture_name("crate.png", TextureType::Type2D);
//!
//! let mut material = Material::new("crate");
//! material.set_shader(shader);
//! material.load(textures);
//! let technique = material.active_technique(&render_system);
//! ```

pub mod error;
pub mod materials;
pub mod query;
pub mod render_system;
pub mod resources;
pub mod shader;

// Re-export main types for convenience
pub use error::GraphicsError;
pub use materials::{
    ContentType, Material, MaterialParameter, Pass, ProgramConstant, Shader, Technique,
    TextureBindingSlot, TextureEffect, TextureTransform,
};
pub use query::{DummyQueryManager, EventQuery, OcclusionQuery, QueryManager, TimerQuery};
pub use render_system::{
    BackendType, RenderSystem, RenderSystemKey, RenderSystemParameters, WgpuBackendType,
};
pub use resources::{
    FileTextureLoader, Texture, TextureCache, TextureLoader, TextureManager, TextureRequest,
    TextureUsage,
};
pub use shader::{
    GpuProgram, NagaCompiler, ProgramCompiler, ProgramDescriptor, ProgramLanguage,
    ProgramManager, ProgramStage,
};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version. Optional; nothing requires it.
pub fn init() {
    log::info!("Camelot Graphics v{} initialized", VERSION);
}
