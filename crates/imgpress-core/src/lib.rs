//! imgpress Core - image transcode pipeline
//!
//! This crate turns a selected image into a smaller re-encoded copy:
//! load raw bytes, decode into a pixel surface, optionally resize, re-encode
//! at a target quality and format, and expose the result as a downloadable
//! artifact.
//!
//! # Module Structure
//!
//! - `validate` - allow-list check on the declared mime type
//! - `load` - source files and the loader stage
//! - `decode` - JPEG/PNG/WebP decoding into a `RasterSurface`
//! - `resize` - dimension policy and scaling
//! - `encode` - JPEG (lossy) and PNG/WebP (lossless) encoding
//! - `artifact` - output artifacts and download sinks
//! - `pipeline` - sequencing and single-flight runs
//! - `handle` - process-wide transient handles
//! - `config` - process-wide configuration
//!
//! # Usage
//!
//! ```ignore
//! use imgpress_core::{DirectorySink, EncodeRequest, MimeType, Pipeline, SourceFile};
//!
//! let bytes = std::fs::read("photo.png")?;
//! let file = SourceFile::from_bytes("photo.png", "image/png", bytes);
//! let request = EncodeRequest::new(800, 0, 0.7, MimeType::Jpeg)?;
//!
//! let artifact = futures::executor::block_on(Pipeline::global().run(file, &request))?;
//! artifact.deliver(&mut DirectorySink::new("."))?;
//! ```

pub mod artifact;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod handle;
pub mod load;
pub mod mime;
pub mod pipeline;
pub mod request;
pub mod resize;
pub mod validate;

#[cfg(test)]
mod test_helpers;

pub use artifact::{DeliveryError, DirectorySink, Download, DownloadSink, OutputArtifact};
pub use config::{AllowList, PipelineConfig};
pub use decode::{DecodeError, DecodeLimits, FilterType, RasterSurface};
pub use encode::{EncodeError, EncodedImage};
pub use error::PipelineError;
pub use handle::{HandleRegistry, TransientHandle};
pub use load::{LoadedResource, SourceFile};
pub use mime::MimeType;
pub use pipeline::Pipeline;
pub use request::{EncodeRequest, Quality};
