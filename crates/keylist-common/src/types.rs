//! Core type definitions for keylist
//!
//! This module defines the bucket identifier and the key filter applied
//! to listed objects.

use derive_more::Display;
use std::fmt;

/// Maximum bucket name length accepted before asking the service.
///
/// Legacy regions allow names up to 255 characters, so the stricter
/// 63-character rule is left to the service.
pub const MAX_BUCKET_NAME_LEN: usize = 255;

/// Name of the bucket to list
#[derive(Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct BucketName(String);

impl BucketName {
    /// Create a new bucket name
    pub fn new(name: impl Into<String>) -> Result<Self, BucketNameError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// Get the bucket name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(name: &str) -> Result<(), BucketNameError> {
        if name.is_empty() {
            return Err(BucketNameError::Empty);
        }
        if name.len() > MAX_BUCKET_NAME_LEN {
            return Err(BucketNameError::TooLong);
        }

        // A slash would be read as part of the object path
        if let Some(c) = name
            .chars()
            .find(|c| *c == '/' || c.is_whitespace() || c.is_control())
        {
            return Err(BucketNameError::InvalidChar(c));
        }

        Ok(())
    }
}

impl fmt::Debug for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BucketName({:?})", self.0)
    }
}

/// Errors that can occur when creating a bucket name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BucketNameError {
    #[error("bucket name must not be empty")]
    Empty,
    #[error("bucket name must be at most {} characters", MAX_BUCKET_NAME_LEN)]
    TooLong,
    #[error("bucket name contains invalid character: {0:?}")]
    InvalidChar(char),
}

/// Prefix/suffix filter applied to listed keys
///
/// Both parts default to the empty string, which matches every key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyFilter {
    /// Keys must start with this prefix
    pub prefix: String,
    /// Keys must end with this suffix
    pub suffix: String,
}

impl KeyFilter {
    /// Create a filter from a prefix and a suffix
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Filter that only checks the prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::new(prefix, "")
    }

    /// Filter that only checks the suffix
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self::new("", suffix)
    }

    /// Whether `key` passes the filter
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        key.starts_with(&self.prefix) && key.ends_with(&self.suffix)
    }

    /// Prefix to hand to the service, if any.
    ///
    /// Only the prefix can be evaluated server side; suffixes are always
    /// checked locally.
    #[must_use]
    pub fn server_prefix(&self) -> Option<&str> {
        (!self.prefix.is_empty()).then_some(self.prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_name_valid() {
        assert!(BucketName::new("demo").is_ok());
        assert!(BucketName::new("my-bucket.logs").is_ok());
        // Legacy names the service may still accept
        assert!(BucketName::new("Legacy_Bucket").is_ok());
        assert!(BucketName::new("a").is_ok());
    }

    #[test]
    fn test_bucket_name_invalid() {
        assert_eq!(BucketName::new(""), Err(BucketNameError::Empty));
        assert_eq!(
            BucketName::new("a".repeat(MAX_BUCKET_NAME_LEN + 1)),
            Err(BucketNameError::TooLong)
        );
        assert_eq!(
            BucketName::new("demo/sub"),
            Err(BucketNameError::InvalidChar('/'))
        );
        assert_eq!(
            BucketName::new("my bucket"),
            Err(BucketNameError::InvalidChar(' '))
        );
    }

    #[test]
    fn test_bucket_name_display() {
        let name = BucketName::new("demo").unwrap();
        assert_eq!(name.to_string(), "demo");
        assert_eq!(name.as_str(), "demo");
        assert_eq!(format!("{name:?}"), "BucketName(\"demo\")");
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let filter = KeyFilter::default();
        assert!(filter.matches(""));
        assert!(filter.matches("a/1.txt"));
        assert!(filter.server_prefix().is_none());
    }

    #[test]
    fn test_filter_prefix_and_suffix() {
        let filter = KeyFilter::new("logs/", ".gz");
        assert!(filter.matches("logs/2024/01.gz"));
        assert!(!filter.matches("logs/2024/01.txt"));
        assert!(!filter.matches("data/logs/01.gz"));
        assert_eq!(filter.server_prefix(), Some("logs/"));

        assert!(KeyFilter::with_prefix("a/").matches("a/1.txt"));
        assert!(!KeyFilter::with_prefix("a/").matches("b/3.txt"));
        assert!(KeyFilter::with_suffix(".txt").matches("b/3.txt"));
        assert!(!KeyFilter::with_suffix(".txt").matches("b/3.csv"));
    }
}
