//! JPEG encoding.
//!
//! JPEG carries no alpha channel. Transparent pixels are composited onto
//! opaque black, which is what a canvas does when asked for `image/jpeg`.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::EncodeError;
use crate::decode::RasterSurface;
use crate::request::Quality;

/// Encode an RGBA surface to JPEG bytes.
///
/// # Quality Guidelines
///
/// * 0.9-1.0: High quality, suitable for archival or further editing
/// * 0.8-0.9: Good quality, recommended for most uses (default: 0.8)
/// * 0.6-0.8: Medium quality, acceptable for web/social media
/// * Below 0.6: Low quality, visible artifacts
pub fn encode_jpeg(surface: &RasterSurface, quality: Quality) -> Result<Vec<u8>, EncodeError> {
    let rgb = flatten_onto_black(&surface.pixels);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.to_jpeg_quality());

    encoder
        .write_image(&rgb, surface.width, surface.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Drop alpha by premultiplying each channel onto black.
fn flatten_onto_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = u16::from(px[3]);
        for &channel in &px[..3] {
            rgb.push(((u16::from(channel) * alpha + 127) / 255) as u8);
        }
    }
    rgb
}
