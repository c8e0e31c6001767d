//! Error types for segsnap.

use thiserror::Error;

/// Errors surfaced to the compression framework.
///
/// Pull-protocol violations (skipping past a source window, advancing a
/// cursor off the end of its buffer) are deliberately *not* represented
/// here: they are caller bugs and abort via `assert!` instead of flowing
/// back as recoverable statuses.
#[derive(Debug, Error)]
pub enum Error {
    /// The wrapped algorithm rejected the input on the compress side.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The compressed stream's length prefix is truncated or unparseable.
    #[error("malformed stream header: {0}")]
    MalformedHeader(String),

    /// The length prefix parsed but the payload failed to decode.
    #[error("corrupted payload: {0}")]
    CorruptedPayload(String),

    /// The offload backend failed an operation it had accepted.
    #[error("accelerator failure: {0}")]
    Accelerator(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_malformed_header() {
        let err = Error::MalformedHeader("snappy: corrupt input (empty)".to_string());
        assert!(err.to_string().contains("malformed stream header"));
    }

    #[test]
    fn test_error_display_corrupted_payload() {
        let err = Error::CorruptedPayload("snappy: corrupt input".to_string());
        assert!(err.to_string().contains("corrupted payload"));
    }

    #[test]
    fn test_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<Error>();
    }
}
