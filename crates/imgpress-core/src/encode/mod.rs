//! Image encoding for imgpress.
//!
//! This module provides functionality for:
//! - Encoding surfaces to JPEG with configurable quality
//! - Encoding surfaces to PNG and WebP losslessly (quality ignored)
//!
//! # Examples
//!
//! ```ignore
//! use imgpress_core::encode::encode_surface;
//! use imgpress_core::{MimeType, Quality};
//!
//! let encoded = encode_surface(&surface, MimeType::Jpeg, Quality::DEFAULT).unwrap();
//! println!("Encoded {} bytes", encoded.bytes.len());
//! ```

mod jpeg;
mod lossless;

use thiserror::Error;

use crate::decode::RasterSurface;
use crate::mime::MimeType;
use crate::request::Quality;

pub use jpeg::encode_jpeg;
pub use lossless::{encode_png, encode_webp};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec failed to serialize the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encoded bytes plus what they contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// The serialized image.
    pub bytes: Vec<u8>,
    /// Format of `bytes`.
    pub mime: MimeType,
    /// Encoded width in pixels.
    pub width: u32,
    /// Encoded height in pixels.
    pub height: u32,
}

/// The encoder stage.
pub async fn encode(
    surface: &RasterSurface,
    mime: MimeType,
    quality: Quality,
) -> Result<EncodedImage, EncodeError> {
    encode_surface(surface, mime, quality)
}

/// Serialize `surface` as `mime`. `quality` only affects lossy formats.
///
/// # Errors
///
/// Returns an error if the surface has a zero dimension, if its buffer does
/// not hold exactly `width * height * 4` bytes, or if the codec fails.
pub fn encode_surface(
    surface: &RasterSurface,
    mime: MimeType,
    quality: Quality,
) -> Result<EncodedImage, EncodeError> {
    let (width, height) = surface.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 4;
    if surface.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: surface.pixels.len(),
        });
    }

    let bytes = match mime {
        MimeType::Jpeg => encode_jpeg(surface, quality)?,
        MimeType::Png => encode_png(surface)?,
        MimeType::Webp => encode_webp(surface)?,
    };

    if mime.is_lossy() {
        log::debug!(
            "encoded {width}x{height} as {mime} ({} bytes, quality {})",
            bytes.len(),
            quality.value()
        );
    } else {
        log::debug!(
            "encoded {width}x{height} as {mime} ({} bytes, lossless)",
            bytes.len()
        );
    }

    Ok(EncodedImage {
        bytes,
        mime,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::solid_surface;

    #[test]
    fn test_mime_is_carried_through() {
        let surface = solid_surface(8, 8, [1, 2, 3, 255]);
        for mime in MimeType::ALL {
            let encoded = encode_surface(&surface, mime, Quality::DEFAULT).unwrap();
            assert_eq!(encoded.mime, mime);
            assert_eq!((encoded.width, encoded.height), (8, 8));
            assert_eq!(crate::decode::sniff(&encoded.bytes), Some(mime));
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let surface = RasterSurface {
            width: 0,
            height: 10,
            pixels: vec![],
        };
        let result = encode_surface(&surface, MimeType::Png, Quality::DEFAULT);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_short_buffer_rejected() {
        let surface = RasterSurface {
            width: 10,
            height: 10,
            pixels: vec![0u8; 10 * 9 * 4],
        };
        let result = encode_surface(&surface, MimeType::Jpeg, Quality::DEFAULT);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 400,
                actual: 360
            })
        ));
    }

    #[test]
    fn test_lossless_ignores_quality() {
        let surface = solid_surface(12, 12, [90, 80, 70, 255]);
        for mime in [MimeType::Png, MimeType::Webp] {
            let low = encode_surface(&surface, mime, Quality::new(0.0).unwrap()).unwrap();
            let high = encode_surface(&surface, mime, Quality::new(1.0).unwrap()).unwrap();
            assert_eq!(low.bytes, high.bytes);
        }
    }

    #[test]
    fn test_async_stage_matches_sync() {
        let surface = solid_surface(6, 6, [5, 5, 5, 255]);
        let via_stage =
            futures::executor::block_on(encode(&surface, MimeType::Png, Quality::DEFAULT)).unwrap();
        let direct = encode_surface(&surface, MimeType::Png, Quality::DEFAULT).unwrap();
        assert_eq!(via_stage, direct);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
