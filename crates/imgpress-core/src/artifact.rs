//! Output artifacts and their delivery.
//!
//! An [`OutputArtifact`] is the end of the core pipeline: encoded bytes kept
//! addressable behind a transient handle. The caller owns it until it is
//! handed to a [`DownloadSink`] or released; either way the handle is revoked.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::encode::EncodedImage;
use crate::handle::{HandleRegistry, TransientHandle};
use crate::mime::MimeType;

/// Errors raised by a download collaborator.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The sink refused or failed to start the download.
    #[error("download sink error: {0}")]
    Sink(String),

    /// Writing the artifact out failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything a sink needs to start a download.
#[derive(Debug, Clone, Copy)]
pub struct Download<'a> {
    /// Transient handle url of the artifact.
    pub url: &'a str,
    /// Suggested file name, e.g. `download.jpeg`.
    pub filename: &'a str,
    /// Content type.
    pub mime: MimeType,
    /// Encoded bytes.
    pub bytes: &'a [u8],
}

/// The download-trigger collaborator.
pub trait DownloadSink {
    /// Start a download of `download`.
    fn deliver(&mut self, download: Download<'_>) -> Result<(), DeliveryError>;
}

/// Writes each delivered artifact into a directory under its filename.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Deliver into `dir`, which must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, download: Download<'_>) -> Result<(), DeliveryError> {
        let path = self.dir.join(download.filename);
        fs::write(&path, download.bytes)?;
        log::info!("wrote {} ({} bytes)", path.display(), download.bytes.len());
        Ok(())
    }
}

/// Encoded output of a pipeline run.
#[derive(Debug)]
pub struct OutputArtifact {
    bytes: Arc<[u8]>,
    mime: MimeType,
    width: u32,
    height: u32,
    filename: String,
    handle: TransientHandle,
}

impl OutputArtifact {
    /// Register `encoded` in `registry` and name it `<stem>.<ext>`.
    pub fn new(encoded: EncodedImage, registry: &Arc<HandleRegistry>, stem: &str) -> Self {
        let EncodedImage {
            bytes,
            mime,
            width,
            height,
        } = encoded;
        let bytes: Arc<[u8]> = bytes.into();
        let handle = registry.register(Arc::clone(&bytes), mime);

        Self {
            bytes,
            mime,
            width,
            height,
            filename: format!("{stem}.{}", mime.extension()),
            handle,
        }
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Output format.
    pub fn mime(&self) -> MimeType {
        self.mime
    }

    /// Encoded width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Encoded height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Suggested download name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The transient handle url; valid until the artifact is delivered or released.
    pub fn url(&self) -> &str {
        self.handle.url()
    }

    /// Hand the artifact to `sink` and release its handle.
    ///
    /// The handle is released whether or not the sink succeeds.
    pub fn deliver(self, sink: &mut impl DownloadSink) -> Result<(), DeliveryError> {
        let result = sink.deliver(Download {
            url: self.handle.url(),
            filename: &self.filename,
            mime: self.mime,
            bytes: &self.bytes,
        });
        match &result {
            Ok(()) => log::info!("delivered {} as {}", self.handle.url(), self.filename),
            Err(err) => log::warn!("delivery of {} failed: {err}", self.filename),
        }
        result
    }

    /// Release the handle without delivering.
    pub fn release(self) {
        log::debug!("released {} undelivered", self.handle.url());
    }
}
