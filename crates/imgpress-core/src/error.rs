//! Error taxonomy for a pipeline run.

use thiserror::Error;

use crate::artifact::DeliveryError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Any failure a pipeline run can surface to its caller.
///
/// Every stage runs at most once per run; none of these are retried.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The declared mime type is not in the allow-list. Raised before loading.
    #[error("Invalid file type: {0}")]
    InvalidFormat(String),

    /// The encode request violates its invariants (e.g. quality outside [0, 1]).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The source content could not be read or its handle is gone.
    #[error("Failed to load source: {0}")]
    LoadFailure(String),

    /// The input exceeds a configured size or pixel limit.
    #[error("Resource limit exceeded: {0}")]
    ResourceLimit(String),

    /// The bytes are not a valid image in a supported codec.
    #[error("Decode failed: {0}")]
    DecodeFailure(#[from] DecodeError),

    /// The surface could not be serialized in the requested format.
    #[error("Encode failed: {0}")]
    EncodeFailure(#[from] EncodeError),

    /// The download collaborator rejected the artifact.
    #[error("Delivery failed: {0}")]
    DeliveryFailure(#[from] DeliveryError),
}

impl From<PipelineError> for String {
    fn from(error: PipelineError) -> Self {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = PipelineError::InvalidFormat("application/pdf".to_string());
        assert_eq!(err.to_string(), "Invalid file type: application/pdf");

        let err = PipelineError::from(DecodeError::UnsupportedCodec);
        assert!(err.to_string().starts_with("Decode failed: "));
    }

    #[test]
    fn test_encode_error_converts() {
        let err: PipelineError = EncodeError::InvalidDimensions {
            width: 0,
            height: 3,
        }
        .into();
        assert!(matches!(err, PipelineError::EncodeFailure(_)));
    }
}
