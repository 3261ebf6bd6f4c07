//! Texture loaders used by [`TextureManager`](super::TextureManager) on a miss.

use std::path::{Path, PathBuf};

use camelot_core::texture::{CpuTexture, decode_texture_file};

use crate::error::GraphicsError;

/// Produces pixel data for a texture name.
pub trait TextureLoader: Send + Sync {
    fn load(&self, name: &str) -> Result<CpuTexture, GraphicsError>;
}

/// Loads textures from image files below a root directory.
#[derive(Debug, Clone)]
pub struct FileTextureLoader {
    root: PathBuf,
}

impl FileTextureLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory texture names are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TextureLoader for FileTextureLoader {
    fn load(&self, name: &str) -> Result<CpuTexture, GraphicsError> {
        let path = self.root.join(name);
        log::debug!("Loading texture '{name}' from {}", path.display());
        let mut pixels = decode_texture_file(&path).map_err(|e| GraphicsError::LoadFailed {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        pixels.name = name.to_string();
        Ok(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_png_from_root() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]))
            .save(dir.path().join("red.png"))
            .unwrap();

        let loader = FileTextureLoader::new(dir.path());
        let pixels = loader.load("red.png").unwrap();
        assert_eq!((pixels.width, pixels.height), (2, 2));
        assert_eq!(pixels.name, "red.png");
    }

    #[test]
    fn missing_file_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileTextureLoader::new(dir.path());
        let err = loader.load("nope.png").unwrap_err();
        assert!(matches!(err, GraphicsError::LoadFailed { ref name, .. } if name == "nope.png"));
    }
}
