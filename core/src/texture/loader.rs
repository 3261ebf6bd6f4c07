//! Image file decoding through the `image` crate.

use std::path::Path;

use super::types::{CpuTexture, TextureDecodeError};

/// Decode an in-memory image file into an RGBA8 [`CpuTexture`].
pub fn decode_texture(name: &str, bytes: &[u8]) -> Result<CpuTexture, TextureDecodeError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| TextureDecodeError::Decode(format!("{name}: {e}")))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::trace!("Decoded texture '{name}' ({width}x{height})");
    Ok(CpuTexture::from_rgba8(name, width, height, rgba.into_raw()))
}

/// Read and decode an image file.
pub fn decode_texture_file(path: &Path) -> Result<CpuTexture, TextureDecodeError> {
    let bytes = std::fs::read(path)
        .map_err(|e| TextureDecodeError::Io(format!("{}: {e}", path.display())))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    decode_texture(&name, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureFormat;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn decodes_png() {
        let tex = decode_texture("pixel.png", &encode_png(3, 2)).unwrap();
        assert_eq!((tex.width, tex.height), (3, 2));
        assert_eq!(tex.format, TextureFormat::Rgba8Unorm);
        assert_eq!(&tex.data[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn rejects_garbage() {
        let err = decode_texture("bad.png", b"not an image").unwrap_err();
        assert!(matches!(err, TextureDecodeError::Decode(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = decode_texture_file(Path::new("/nonexistent/texture.png")).unwrap_err();
        assert!(matches!(err, TextureDecodeError::Io(_)));
    }
}
