//! Lossless PNG and WebP encoding. Quality is not consulted.

use std::io::Cursor;

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::EncodeError;
use crate::decode::RasterSurface;

/// Encode an RGBA surface to PNG with the strongest deflate setting.
pub fn encode_png(surface: &RasterSurface) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, PngFilter::Adaptive)
        .write_image(
            &surface.pixels,
            surface.width,
            surface.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Encode an RGBA surface to lossless WebP.
pub fn encode_webp(surface: &RasterSurface) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(
            &surface.pixels,
            surface.width,
            surface.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::solid_surface;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(&solid_surface(16, 8, [1, 2, 3, 255])).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_png_keeps_alpha() {
        let surface = solid_surface(4, 4, [10, 20, 30, 40]);
        let png = encode_png(&surface).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().into_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0, [10, 20, 30, 40]);
    }

    #[test]
    fn test_encode_webp_container() {
        let webp = encode_webp(&solid_surface(16, 8, [1, 2, 3, 255])).unwrap();
        assert_eq!(&webp[..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
    }

    #[test]
    fn test_webp_is_lossless() {
        let surface = solid_surface(5, 3, [250, 7, 99, 255]);
        let webp = encode_webp(&surface).unwrap();

        let decoded = image::load_from_memory(&webp).unwrap().into_rgba8();
        assert_eq!(decoded.dimensions(), (5, 3));
        assert_eq!(decoded.get_pixel(4, 2).0, [250, 7, 99, 255]);
    }
}
