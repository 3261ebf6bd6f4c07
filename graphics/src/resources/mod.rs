//! Texture resources and the texture cache interface.
//!
//! Texture binding slots never own textures. They resolve names through a
//! [`TextureCache`] and keep only a weak reference to the result:
//!
//! - [`Texture`] - a resident texture record, shared through `Arc`
//! - [`TextureCache`] - the narrow interface slots resolve names through
//! - [`TextureManager`] - in-process cache with an optional [`TextureLoader`]
//! - [`FileTextureLoader`] - decodes image files below a root directory

mod loader;
mod manager;
mod texture;

pub use loader::{FileTextureLoader, TextureLoader};
pub use manager::{TextureCache, TextureManager, TextureRequest};
pub use texture::{Texture, TextureUsage};
