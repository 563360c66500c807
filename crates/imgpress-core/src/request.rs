//! Encode request: target dimensions, quality and output format for one run.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::mime::MimeType;

/// Compression quality in `[0, 1]`.
///
/// Only lossy encoders read it; lossless ones ignore it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Quality(f32);

impl Quality {
    /// Quality used by the original one-button flow.
    pub const DEFAULT: Quality = Quality(0.8);

    /// Validate a raw quality value.
    pub fn new(value: f32) -> Result<Self, PipelineError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PipelineError::InvalidRequest(format!(
                "quality must be within [0, 1], got {value}"
            )))
        }
    }

    /// The raw value.
    pub fn value(self) -> f32 {
        self.0
    }

    /// Map to the JPEG encoder's 1-100 scale.
    pub fn to_jpeg_quality(self) -> u8 {
        (self.0 * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f32> for Quality {
    type Error = PipelineError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quality> for f32 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

/// Parameters of a single pipeline run.
///
/// `width` and `height` of zero mean "keep the natural dimension". When both
/// are positive the output is scaled to exactly that size, ignoring aspect
/// ratio. When only one is positive the other is derived from the source
/// aspect ratio.
///
/// Deserializes from a camelCase object with every field optional, e.g.
/// `{ "width": 400, "quality": 0.6, "outputMime": "image/webp" }`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncodeRequest {
    /// Target width in pixels, or 0.
    pub width: u32,
    /// Target height in pixels, or 0.
    pub height: u32,
    /// Compression quality.
    pub quality: Quality,
    /// Output format.
    pub output_mime: MimeType,
}

impl EncodeRequest {
    /// Build a request, validating the quality value.
    pub fn new(
        width: u32,
        height: u32,
        quality: f32,
        output_mime: MimeType,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            width,
            height,
            quality: Quality::new(quality)?,
            output_mime,
        })
    }

    /// Whether this request keeps the natural dimensions.
    pub fn is_pass_through(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_bounds() {
        assert!(Quality::new(0.0).is_ok());
        assert!(Quality::new(1.0).is_ok());
        assert!(Quality::new(0.5).is_ok());
        assert!(Quality::new(-0.01).is_err());
        assert!(Quality::new(1.01).is_err());
        assert!(Quality::new(f32::NAN).is_err());
    }

    #[test]
    fn test_quality_error_is_invalid_request() {
        assert!(matches!(
            Quality::new(2.0),
            Err(PipelineError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_jpeg_quality_mapping() {
        assert_eq!(Quality::new(0.8).unwrap().to_jpeg_quality(), 80);
        assert_eq!(Quality::new(1.0).unwrap().to_jpeg_quality(), 100);
        assert_eq!(Quality::new(0.0).unwrap().to_jpeg_quality(), 1);
        assert_eq!(Quality::new(0.004).unwrap().to_jpeg_quality(), 1);
        assert_eq!(Quality::new(0.556).unwrap().to_jpeg_quality(), 56);
    }

    #[test]
    fn test_default_request() {
        let request = EncodeRequest::default();
        assert!(request.is_pass_through());
        assert_eq!(request.quality, Quality::DEFAULT);
        assert_eq!(request.output_mime, MimeType::Jpeg);
    }

    #[test]
    fn test_deserialize_partial_object() {
        let request: EncodeRequest =
            serde_json::from_str(r#"{ "width": 400, "outputMime": "image/webp" }"#).unwrap();
        assert_eq!(request.width, 400);
        assert_eq!(request.height, 0);
        assert_eq!(request.quality, Quality::DEFAULT);
        assert_eq!(request.output_mime, MimeType::Webp);
    }

    #[test]
    fn test_deserialize_rejects_bad_quality() {
        let result: Result<EncodeRequest, _> = serde_json::from_str(r#"{ "quality": 1.5 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_mime() {
        let result: Result<EncodeRequest, _> =
            serde_json::from_str(r#"{ "outputMime": "image/gif" }"#);
        assert!(result.is_err());
    }
}
