//! Pipeline configuration.
//!
//! `PipelineConfig` gathers every tunable of a run: the input allow-list,
//! the size and pixel limits enforced while loading and decoding, the resize
//! filter and the defaults used when the caller does not supply a request.
//!
//! A single process-wide instance is installed once (or defaulted on first
//! use) and read through [`PipelineConfig::global`]; callers that need an
//! isolated setup build their own and hand it to `Pipeline::new`.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::decode::{DecodeLimits, FilterType};
use crate::mime::MimeType;
use crate::request::EncodeRequest;

static GLOBAL: OnceCell<PipelineConfig> = OnceCell::new();

/// The set of declared mime types accepted before a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowList {
    accepted: Vec<MimeType>,
}

impl AllowList {
    /// Build an allow-list from explicit entries.
    pub fn new(accepted: impl IntoIterator<Item = MimeType>) -> Self {
        Self {
            accepted: accepted.into_iter().collect(),
        }
    }

    /// Resolve a declared mime string to an accepted [`MimeType`].
    pub fn accept(&self, declared: &str) -> Option<MimeType> {
        MimeType::parse(declared).filter(|mime| self.accepted.contains(mime))
    }

    /// Accepted entries, in order.
    pub fn entries(&self) -> &[MimeType] {
        &self.accepted
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(MimeType::ALL)
    }
}

/// Tunables for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Declared input types accepted by the validator.
    pub allow_list: AllowList,
    /// Largest source file the loader will read (bytes).
    pub max_file_size: u64,
    /// Largest decoded image (`width * height`).
    pub max_decoded_pixels: u64,
    /// Largest decoded buffer, estimated as RGBA (bytes).
    pub max_decoded_bytes: u64,
    /// Interpolation used when a resize is requested.
    pub resize_filter: FilterType,
    /// Request used by callers that only supply a file.
    pub default_request: EncodeRequest,
    /// Download filename stem; the extension follows the output mime.
    pub download_stem: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            allow_list: AllowList::default(),
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            resize_filter: FilterType::Bilinear,
            default_request: EncodeRequest::default(),
            download_stem: "download".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Install the process-wide configuration.
    ///
    /// Succeeds only once, and only before the first [`PipelineConfig::global`]
    /// call; otherwise the rejected config is handed back.
    pub fn install(config: PipelineConfig) -> Result<(), PipelineConfig> {
        GLOBAL.set(config)
    }

    /// The process-wide configuration, defaulted on first access.
    pub fn global() -> &'static PipelineConfig {
        GLOBAL.get_or_init(PipelineConfig::default)
    }

    /// Decoder limits derived from this configuration.
    pub fn decode_limits(&self) -> DecodeLimits {
        DecodeLimits {
            max_pixels: self.max_decoded_pixels,
            max_bytes: self.max_decoded_bytes,
        }
    }
}
