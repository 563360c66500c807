//! Allow-list check that runs before any pipeline stage.

use crate::config::AllowList;
use crate::error::PipelineError;
use crate::load::SourceFile;
use crate::mime::MimeType;

/// Accept `file` if its declared mime type is on `allow_list`.
///
/// Only the declared type is inspected; the content is not read.
pub fn validate(file: &SourceFile, allow_list: &AllowList) -> Result<MimeType, PipelineError> {
    allow_list.accept(file.declared_mime()).ok_or_else(|| {
        log::warn!(
            "rejected {}: declared type {:?} is not allowed",
            file.name(),
            file.declared_mime()
        );
        PipelineError::InvalidFormat(file.declared_mime().to_string())
    })
}
