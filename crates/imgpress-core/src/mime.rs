//! Supported image mime types.
//!
//! The accepted set is exactly `image/jpeg`, `image/png` and `image/webp`.
//! Declared strings are normalized before comparison: ASCII case, surrounding
//! whitespace and `;` parameters are ignored, so `IMAGE/PNG` and
//! `image/webp; q=1` are accepted while `image/jpg` or `image/gif` are not.

use std::fmt;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

/// An image mime type the pipeline can decode and encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MimeType {
    /// `image/jpeg`
    #[default]
    #[serde(rename = "image/jpeg")]
    Jpeg,
    /// `image/png`
    #[serde(rename = "image/png")]
    Png,
    /// `image/webp`
    #[serde(rename = "image/webp")]
    Webp,
}

impl MimeType {
    /// Every supported mime type, in allow-list order.
    pub const ALL: [MimeType; 3] = [MimeType::Jpeg, MimeType::Png, MimeType::Webp];

    /// Parse a declared mime string.
    ///
    /// Matching is case-insensitive, ignores surrounding whitespace and any
    /// `;`-separated parameters (`image/png; charset=binary`).
    pub fn parse(declared: &str) -> Option<Self> {
        let essence = declared.split(';').next().unwrap_or_default().trim();
        Self::ALL
            .into_iter()
            .find(|mime| mime.as_str().eq_ignore_ascii_case(essence))
    }

    /// The canonical mime string.
    pub fn as_str(self) -> &'static str {
        match self {
            MimeType::Jpeg => "image/jpeg",
            MimeType::Png => "image/png",
            MimeType::Webp => "image/webp",
        }
    }

    /// File extension used when naming a download.
    pub fn extension(self) -> &'static str {
        match self {
            MimeType::Jpeg => "jpeg",
            MimeType::Png => "png",
            MimeType::Webp => "webp",
        }
    }

    /// Whether the encoder for this type honours the quality parameter.
    ///
    /// WebP is written with the lossless encoder, so only JPEG is lossy here.
    pub fn is_lossy(self) -> bool {
        matches!(self, MimeType::Jpeg)
    }

    /// The `image` crate format backing this mime type.
    pub fn image_format(self) -> ImageFormat {
        match self {
            MimeType::Jpeg => ImageFormat::Jpeg,
            MimeType::Png => ImageFormat::Png,
            MimeType::Webp => ImageFormat::WebP,
        }
    }

    /// Map a sniffed `image` crate format back to a supported mime type.
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(MimeType::Jpeg),
            ImageFormat::Png => Some(MimeType::Png),
            ImageFormat::WebP => Some(MimeType::Webp),
            _ => None,
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
