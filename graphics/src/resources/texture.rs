//! Resident texture record.

use bitflags::bitflags;
use camelot_core::texture::{CpuTexture, TextureFormat, TextureType};

bitflags! {
    /// How a texture may be used.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureUsage: u32 {
        /// Texture can be sampled in a shader.
        const SAMPLED = 1 << 0;
        /// Texture can be rendered into (shadow maps, compositor targets).
        const RENDER_TARGET = 1 << 1;
        /// Texture contents are updated from the CPU every frame.
        const DYNAMIC = 1 << 2;
    }
}

/// A texture known to the texture cache.
///
/// Textures are shared through `Arc`; texture binding slots hold `Weak`
/// references to them, so the cache alone decides how long a texture lives.
///
/// # Example
///
/// ```ignore
/// let texture = Texture::new("rock.png", TextureType::Type2D, TextureFormat::Rgba8Unorm, 256, 256)
///     .with_mip_levels(9);
/// println!("Texture size: {}x{}", texture.width(), texture.height());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    name: String,
    texture_type: TextureType,
    format: TextureFormat,
    width: u32,
    height: u32,
    depth: u32,
    mip_levels: u32,
    usage: TextureUsage,
    hardware_gamma: bool,
    pixels: Option<CpuTexture>,
}

impl Texture {
    /// Create a sampled texture without pixel data.
    pub fn new(
        name: impl Into<String>,
        texture_type: TextureType,
        format: TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let depth = if texture_type == TextureType::CubeMap {
            6
        } else {
            1
        };
        Self {
            name: name.into(),
            texture_type,
            format,
            width,
            height,
            depth,
            mip_levels: 1,
            usage: TextureUsage::SAMPLED,
            hardware_gamma: false,
            pixels: None,
        }
    }

    /// Create a texture holding decoded pixels.
    pub fn from_cpu(pixels: CpuTexture) -> Self {
        Self {
            name: pixels.name.clone(),
            texture_type: pixels.texture_type,
            format: pixels.format,
            width: pixels.width,
            height: pixels.height,
            depth: pixels.depth,
            mip_levels: 1,
            usage: TextureUsage::SAMPLED,
            hardware_gamma: false,
            pixels: Some(pixels),
        }
    }

    /// Create a texture that is rendered into and then sampled.
    pub fn render_target(
        name: impl Into<String>,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> Self {
        Self::new(name, TextureType::Type2D, format, width, height)
            .with_usage(TextureUsage::SAMPLED | TextureUsage::RENDER_TARGET)
    }

    #[must_use]
    pub fn with_mip_levels(mut self, mip_levels: u32) -> Self {
        self.mip_levels = mip_levels.max(1);
        self
    }

    #[must_use]
    pub fn with_usage(mut self, usage: TextureUsage) -> Self {
        self.usage = usage;
        self
    }

    #[must_use]
    pub fn with_hardware_gamma(mut self, enabled: bool) -> Self {
        self.hardware_gamma = enabled;
        self
    }

    /// Get the texture name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn texture_type(&self) -> TextureType {
        self.texture_type
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Get the texture width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the texture height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the texture depth (or face count for cube maps).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Get the mip level count, including the base level.
    pub fn mip_levels(&self) -> u32 {
        self.mip_levels
    }

    pub fn usage(&self) -> TextureUsage {
        self.usage
    }

    pub fn hardware_gamma(&self) -> bool {
        self.hardware_gamma
    }

    /// Decoded pixels, if the texture was loaded from an image.
    pub fn pixels(&self) -> Option<&CpuTexture> {
        self.pixels.as_ref()
    }
}

static_assertions::assert_impl_all!(Texture: Send, Sync);
