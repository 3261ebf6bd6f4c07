//! CPU-side texture types.
//!
//! Provides [`CpuTexture`] for holding decoded pixel data, along with
//! [`TextureType`], [`TextureFormat`] and [`MipmapCount`] shared between
//! texture binding slots and the texture cache. With the `image-loader`
//! feature, [`decode_texture`] and [`decode_texture_file`] turn image files
//! into [`CpuTexture`]s.

#[cfg(feature = "image-loader")]
mod loader;
mod types;

#[cfg(feature = "image-loader")]
pub use loader::{decode_texture, decode_texture_file};
pub use types::{CpuTexture, MipmapCount, TextureDecodeError, TextureFormat, TextureType};
