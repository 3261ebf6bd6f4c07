//! # Camelot Core
//!
//! Backend-agnostic value types shared by the material pipeline: math
//! aliases, colours, sampler state, CPU texture data and the layer/scene
//! blending vocabulary.

pub mod color;
pub mod material;
pub mod math;
pub mod sampler;
pub mod texture;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
