//! Material system.
//!
//! A material is a tree: [`Material`] owns a [`Shader`], which lists
//! [`Technique`]s keyed by render system and renderer. Each technique holds
//! ordered [`Pass`]es, and each pass holds ordered [`TextureBindingSlot`]s.
//!
//! - [`TextureBindingSlot`] - one texture binding: frames, sampler state,
//!   blending, UV transform and effects
//! - [`TextureTransform`] - lazily recomputed UV matrix
//! - [`Pass`] - programs, slots and constants for one draw
//! - [`Technique`] - passes targeting one `(render system, renderer)` pair
//! - [`Shader`] - techniques in priority order
//! - [`Material`] - a shader plus named parameter values

mod material;
mod pass;
mod shader;
mod technique;
mod texture_slot;
mod texture_transform;

pub use material::{Material, MaterialParameter};
pub use pass::{Pass, ProgramConstant};
pub use shader::Shader;
pub use technique::Technique;
pub use texture_slot::{
    BindingType, CUBE_FACE_SUFFIXES, ContentType, EnvMapType, TextureBindingSlot, TextureEffect,
};
pub use texture_transform::TextureTransform;
