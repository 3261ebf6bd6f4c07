//! Texture cache interface and the in-process texture manager.

use std::collections::HashMap;
use std::sync::Arc;

use camelot_core::texture::{MipmapCount, TextureFormat, TextureType};
use parking_lot::RwLock;

use crate::error::GraphicsError;

use super::loader::TextureLoader;
use super::texture::Texture;

/// Load hints a texture binding slot passes along with a name.
///
/// Hints only matter when the cache has to load the texture; a texture that
/// is already resident is returned unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureRequest {
    pub texture_type: TextureType,
    /// Desired pixel format, or [`TextureFormat::Unknown`] to keep the source's.
    pub format: TextureFormat,
    pub mipmaps: MipmapCount,
    pub hardware_gamma: bool,
    /// Load a single-channel image as alpha.
    pub is_alpha: bool,
}

/// External texture cache that texture binding slots resolve names through.
pub trait TextureCache: Send + Sync {
    /// Find or load the texture called `name`.
    fn resolve(&self, name: &str, request: &TextureRequest) -> Result<Arc<Texture>, GraphicsError>;

    /// Make sure `name` is resident without handing out a reference.
    fn prepare(&self, name: &str, request: &TextureRequest) -> Result<(), GraphicsError> {
        self.resolve(name, request).map(|_| ())
    }
}

/// In-process [`TextureCache`] keyed by texture name.
///
/// Misses go to the optional [`TextureLoader`]; without one, a miss is
/// [`GraphicsError::ResourceNotFound`].
pub struct TextureManager {
    textures: RwLock<HashMap<String, Arc<Texture>>>,
    loader: Option<Box<dyn TextureLoader>>,
    default_mipmaps: u32,
}

impl TextureManager {
    /// Create an empty manager without a loader.
    pub fn new() -> Self {
        Self {
            textures: RwLock::new(HashMap::new()),
            loader: None,
            default_mipmaps: 0,
        }
    }

    /// Load misses through `loader`.
    #[must_use]
    pub fn with_loader(mut self, loader: impl TextureLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Mip levels generated for [`MipmapCount::Default`].
    #[must_use]
    pub fn with_default_mipmaps(mut self, count: u32) -> Self {
        self.default_mipmaps = count;
        self
    }

    /// Register a texture, replacing any texture with the same name.
    pub fn insert(&self, texture: Texture) -> Arc<Texture> {
        let texture = Arc::new(texture);
        self.textures
            .write()
            .insert(texture.name().to_string(), Arc::clone(&texture));
        texture
    }

    /// Forget a texture. Slots holding it keep working until the last
    /// strong reference is gone.
    pub fn remove(&self, name: &str) -> Option<Arc<Texture>> {
        self.textures.write().remove(name)
    }

    /// Get a resident texture without loading.
    pub fn get(&self, name: &str) -> Option<Arc<Texture>> {
        self.textures.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.textures.read().contains_key(name)
    }

    /// Number of resident textures.
    pub fn len(&self) -> usize {
        self.textures.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.read().is_empty()
    }

    /// Forget every texture.
    pub fn clear(&self) {
        self.textures.write().clear();
    }

    fn load(&self, name: &str, request: &TextureRequest) -> Result<Texture, GraphicsError> {
        let Some(loader) = &self.loader else {
            return Err(GraphicsError::ResourceNotFound(format!("texture '{name}'")));
        };

        let mut pixels = loader.load(name)?;
        if request.is_alpha {
            match pixels.extract_alpha() {
                Some(alpha) => pixels = alpha,
                None => log::debug!(
                    "Texture '{name}': no alpha channel in {:?}, keeping source format",
                    pixels.format
                ),
            }
        } else if request.format != TextureFormat::Unknown {
            match pixels.convert(request.format) {
                Some(converted) => pixels = converted,
                None => log::debug!(
                    "Texture '{name}': cannot convert {:?} to {:?}, keeping source format",
                    pixels.format,
                    request.format
                ),
            }
        }
        // The pixel layout decides the type; the request cannot reshape it.
        if request.texture_type != pixels.texture_type {
            log::debug!(
                "Texture '{name}': requested {:?}, source is {:?}",
                request.texture_type,
                pixels.texture_type
            );
        }

        let mip_levels = request
            .mipmaps
            .level_count(pixels.width, pixels.height, self.default_mipmaps);
        let texture = Texture::from_cpu(pixels)
            .with_mip_levels(mip_levels)
            .with_hardware_gamma(request.hardware_gamma);
        Ok(texture)
    }
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureCache for TextureManager {
    fn resolve(&self, name: &str, request: &TextureRequest) -> Result<Arc<Texture>, GraphicsError> {
        if let Some(texture) = self.get(name) {
            log::trace!("Texture cache hit: '{name}'");
            return Ok(texture);
        }

        log::debug!("Texture cache miss: '{name}', loading");
        let texture = self.load(name, request)?;

        // Another thread may have loaded the same name meanwhile; keep the first.
        let mut textures = self.textures.write();
        let entry = textures
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(texture));
        Ok(Arc::clone(entry))
    }
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("textures", &self.len())
            .field("has_loader", &self.loader.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(TextureManager: Send, Sync);
