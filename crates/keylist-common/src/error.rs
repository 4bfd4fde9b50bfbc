//! Error types for keylist
//!
//! This module defines the common error type used by the listing client
//! and the CLI.

use crate::types::BucketNameError;
use thiserror::Error;

/// Common result type for keylist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for keylist
#[derive(Debug, Error)]
pub enum Error {
    // Invocation errors
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid bucket name: {0}")]
    InvalidBucketName(#[from] BucketNameError),

    #[error("configuration error: {0}")]
    Configuration(String),

    // Listing errors
    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    #[error("access denied to bucket: {0}")]
    AccessDenied(String),

    #[error("listing response for bucket {bucket} has no contents")]
    MissingContents { bucket: String },

    #[error("storage service error {code}: {message}")]
    Service { code: String, message: String },

    // Transport errors
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("request timeout")]
    Timeout,
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a storage service error
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Check if this error was raised before any request left the process
    #[must_use]
    pub const fn is_invocation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::InvalidBucketName(_) | Self::Configuration(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_errors() {
        assert!(Error::invalid_argument("no bucket").is_invocation_error());
        assert!(Error::from(BucketNameError::Empty).is_invocation_error());
        assert!(Error::configuration("bad page size").is_invocation_error());
        assert!(!Error::Timeout.is_invocation_error());
        assert!(!Error::BucketNotFound("demo".into()).is_invocation_error());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::from(BucketNameError::Empty).to_string(),
            "invalid bucket name: bucket name must not be empty"
        );
        assert_eq!(
            Error::MissingContents {
                bucket: "demo".into()
            }
            .to_string(),
            "listing response for bucket demo has no contents"
        );
        assert_eq!(
            Error::service("SlowDown", "reduce your request rate").to_string(),
            "storage service error SlowDown: reduce your request rate"
        );
    }
}
