//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::PipelineError;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not in one of the supported codecs (JPEG, PNG, WebP).
    #[error("Invalid or unsupported image format")]
    UnsupportedCodec,

    /// The image header could not be read.
    #[error("Unreadable image header: {0}")]
    InvalidHeader(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resource ceilings for any surface the pipeline is about to allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Largest accepted `width * height`.
    pub max_pixels: u64,
    /// Largest accepted RGBA buffer in bytes.
    pub max_bytes: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_pixels: 40_000_000,
            max_bytes: 160 * 1024 * 1024,
        }
    }
}

impl DecodeLimits {
    /// Reject a `width` x `height` RGBA surface that would exceed these limits.
    pub fn check(&self, width: u32, height: u32) -> Result<(), PipelineError> {
        let pixels = u64::from(width) * u64::from(height);
        if pixels > self.max_pixels {
            return Err(PipelineError::ResourceLimit(format!(
                "{width}x{height} is {pixels} pixels (limit: {})",
                self.max_pixels
            )));
        }

        let estimated = pixels.saturating_mul(4);
        if estimated > self.max_bytes {
            return Err(PipelineError::ResourceLimit(format!(
                "{width}x{height} needs {:.2} MB (limit: {:.2} MB)",
                estimated as f64 / 1024.0 / 1024.0,
                self.max_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }
}

/// An in-memory decoded image with RGBA pixel data.
///
/// Owned by whichever stage produced it and moved into the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl RasterSurface {
    /// Create a new RasterSurface with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Take ownership of an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert into an `image::RgbaImage` without copying.
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    pub fn into_rgba_image(self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels)
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
