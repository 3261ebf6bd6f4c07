//! Texture type, format and pixel container definitions.

use std::fmt;

/// Dimensionality of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureType {
    /// One-dimensional texture.
    Type1D,
    /// Two-dimensional texture.
    #[default]
    Type2D,
    /// Volume texture.
    Type3D,
    /// Six-faced cube map.
    CubeMap,
}

/// Pixel format of texture data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFormat {
    /// Keep whatever format the source provides.
    #[default]
    Unknown,
    R8Unorm,
    Rg8Unorm,
    Rgba8Unorm,
    Rgba8UnormSrgb,
    Bgra8Unorm,
    Rgba16Float,
    Rgba32Float,
    Depth32Float,
}

impl TextureFormat {
    /// Bytes per pixel, or 0 for [`TextureFormat::Unknown`].
    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::R8Unorm => 1,
            Self::Rg8Unorm => 2,
            Self::Rgba8Unorm | Self::Rgba8UnormSrgb | Self::Bgra8Unorm | Self::Depth32Float => 4,
            Self::Rgba16Float => 8,
            Self::Rgba32Float => 16,
        }
    }

    /// Whether the format carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(
            self,
            Self::Rgba8Unorm
                | Self::Rgba8UnormSrgb
                | Self::Bgra8Unorm
                | Self::Rgba16Float
                | Self::Rgba32Float
        )
    }

    /// Whether the format is a depth format.
    pub fn is_depth(self) -> bool {
        matches!(self, Self::Depth32Float)
    }
}

/// How many mip levels to generate for a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MipmapCount {
    /// Use the texture cache's default.
    #[default]
    Default,
    /// Generate down to 1x1.
    Unlimited,
    /// Exactly this many levels below the base level.
    Count(u32),
}

impl MipmapCount {
    /// Resolve to a concrete level count (including the base level) for a
    /// texture of the given size.
    pub fn level_count(self, width: u32, height: u32, default: u32) -> u32 {
        let full = 32 - width.max(height).max(1).leading_zeros();
        match self {
            Self::Default => default.saturating_add(1).min(full),
            Self::Unlimited => full,
            Self::Count(n) => n.saturating_add(1).min(full),
        }
    }
}

/// Decoded, CPU-resident texture data.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTexture {
    /// Name the texture was loaded under.
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Depth (volume textures) or face count (cube maps); 1 otherwise.
    pub depth: u32,
    pub format: TextureFormat,
    pub texture_type: TextureType,
    /// Tightly packed pixel rows.
    pub data: Vec<u8>,
}

impl CpuTexture {
    /// Create a 2D RGBA8 texture from packed pixels.
    pub fn from_rgba8(name: impl Into<String>, width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            depth: 1,
            format: TextureFormat::Rgba8Unorm,
            texture_type: TextureType::Type2D,
            data,
        }
    }

    /// Create a zero-filled texture.
    pub fn new(
        name: impl Into<String>,
        texture_type: TextureType,
        format: TextureFormat,
        width: u32,
        height: u32,
        depth: u32,
    ) -> Self {
        let size = width as usize * height as usize * depth as usize;
        Self {
            name: name.into(),
            width,
            height,
            depth,
            format,
            texture_type,
            data: vec![0; size * format.bytes_per_pixel() as usize],
        }
    }

    /// Expected size of [`CpuTexture::data`] in bytes.
    pub fn byte_size(&self) -> usize {
        self.width as usize
            * self.height as usize
            * self.depth as usize
            * self.format.bytes_per_pixel() as usize
    }

    /// Re-encode into `format`. Only conversions between the 8-bit
    /// four-channel formats, and from them to `R8Unorm` (red channel), are
    /// supported; anything else returns `None`.
    pub fn convert(&self, format: TextureFormat) -> Option<CpuTexture> {
        if format == self.format {
            return Some(self.clone());
        }
        let red = self.channel_offset(0)?;
        let blue = self.channel_offset(2)?;
        let data = match format {
            TextureFormat::Rgba8Unorm | TextureFormat::Rgba8UnormSrgb => self
                .data
                .chunks_exact(4)
                .flat_map(|p| [p[red], p[1], p[blue], p[3]])
                .collect(),
            TextureFormat::Bgra8Unorm => self
                .data
                .chunks_exact(4)
                .flat_map(|p| [p[blue], p[1], p[red], p[3]])
                .collect(),
            TextureFormat::R8Unorm => self.data.chunks_exact(4).map(|p| p[red]).collect(),
            _ => return None,
        };
        Some(self.with_data(format, data))
    }

    /// Single-channel `R8Unorm` copy holding only the alpha channel, or
    /// `None` when the format is not 8-bit four-channel.
    pub fn extract_alpha(&self) -> Option<CpuTexture> {
        let alpha = self.channel_offset(3)?;
        let data = self.data.chunks_exact(4).map(|p| p[alpha]).collect();
        Some(self.with_data(TextureFormat::R8Unorm, data))
    }

    /// Byte offset of RGBA channel `channel` within an 8-bit four-channel pixel.
    fn channel_offset(&self, channel: usize) -> Option<usize> {
        match self.format {
            TextureFormat::Rgba8Unorm | TextureFormat::Rgba8UnormSrgb => Some(channel),
            TextureFormat::Bgra8Unorm => Some([2, 1, 0, 3][channel]),
            _ => None,
        }
    }

    fn with_data(&self, format: TextureFormat, data: Vec<u8>) -> CpuTexture {
        CpuTexture {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            depth: self.depth,
            format,
            texture_type: self.texture_type,
            data,
        }
    }
}

/// Errors produced while decoding texture files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureDecodeError {
    /// The file could not be read.
    Io(String),
    /// The bytes are not a decodable image.
    Decode(String),
}

impl fmt::Display for TextureDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for TextureDecodeError {}
