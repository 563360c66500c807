//! Source files and the loader stage.
//!
//! The loader reads a [`SourceFile`] to completion and registers its bytes
//! behind a [`TransientHandle`]. It does not look at the content; format
//! checks happen in the validator before it and the decoder after it.

use std::fmt;
use std::sync::Arc;

use futures::io::{AsyncRead, AsyncReadExt, Cursor};

use crate::error::PipelineError;
use crate::handle::{HandleRegistry, TransientHandle};
use crate::mime::MimeType;

/// A user-selected file: declared metadata plus a reader over its content.
pub struct SourceFile {
    name: String,
    declared_mime: String,
    size: u64,
    content: Box<dyn AsyncRead + Unpin>,
}

impl SourceFile {
    /// A file whose content is already in memory.
    pub fn from_bytes(name: impl Into<String>, declared_mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self::from_reader(name, declared_mime, size, Cursor::new(bytes))
    }

    /// A file read lazily from `content`; `size` is the declared length.
    pub fn from_reader(
        name: impl Into<String>,
        declared_mime: impl Into<String>,
        size: u64,
        content: impl AsyncRead + Unpin + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            declared_mime: declared_mime.into(),
            size,
            content: Box::new(content),
        }
    }

    /// The file name as selected.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The mime type the file claims to be.
    pub fn declared_mime(&self) -> &str {
        &self.declared_mime
    }

    /// The declared size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("declared_mime", &self.declared_mime)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// The loaded bytes of a source file, addressable through a transient handle.
///
/// Dropping it releases the handle.
#[derive(Debug)]
pub struct LoadedResource {
    handle: TransientHandle,
    declared_mime: MimeType,
    len: usize,
}

impl LoadedResource {
    /// The handle the decoder resolves.
    pub fn handle(&self) -> &TransientHandle {
        &self.handle
    }

    /// The validated declared mime type.
    pub fn declared_mime(&self) -> MimeType {
        self.declared_mime
    }

    /// Number of bytes read.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no bytes were read. Never true for a resource returned by [`load`].
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Read `file` to the end and register its content.
///
/// `declared_mime` is the type the validator accepted for this file.
///
/// # Errors
///
/// - `ResourceLimit` if the declared size or the bytes read exceed `max_bytes`.
/// - `LoadFailure` if reading fails or yields no bytes.
pub async fn load(
    file: SourceFile,
    declared_mime: MimeType,
    registry: &Arc<HandleRegistry>,
    max_bytes: u64,
) -> Result<LoadedResource, PipelineError> {
    let SourceFile {
        name,
        size,
        content,
        ..
    } = file;

    if size > max_bytes {
        return Err(too_large(&name, size, max_bytes));
    }

    // One byte past the limit is enough to tell an oversized stream apart.
    let mut limited = content.take(max_bytes.saturating_add(1));
    let mut bytes = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
    limited
        .read_to_end(&mut bytes)
        .await
        .map_err(|e| PipelineError::LoadFailure(format!("{name}: {e}")))?;

    let read = bytes.len() as u64;
    if read > max_bytes {
        return Err(too_large(&name, read, max_bytes));
    }
    if bytes.is_empty() {
        return Err(PipelineError::LoadFailure(format!("{name}: file is empty")));
    }
    if read != size {
        log::warn!("{name}: declared {size} bytes but read {read}");
    }

    let len = bytes.len();
    let handle = registry.register(bytes, declared_mime);
    log::debug!("loaded {name} ({len} bytes) as {}", handle.url());

    Ok(LoadedResource {
        handle,
        declared_mime,
        len,
    })
}

fn too_large(name: &str, size: u64, max_bytes: u64) -> PipelineError {
    PipelineError::ResourceLimit(format!(
        "{name}: file is {:.2} MB (limit: {:.2} MB)",
        size as f64 / 1024.0 / 1024.0,
        max_bytes as f64 / 1024.0 / 1024.0
    ))
}
