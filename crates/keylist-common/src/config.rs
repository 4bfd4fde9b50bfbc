//! Configuration types for keylist
//!
//! Settings can come from an optional TOML file; the CLI layers its own
//! flags on top.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Largest page the listing API returns in one response
pub const MAX_PAGE_SIZE: i32 = 1000;

/// Object storage client configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Region override (e.g., "us-east-1"); the ambient region otherwise
    pub region: Option<String>,
    /// Custom endpoint URL for S3-compatible services
    pub endpoint: Option<String>,
    /// Shared config profile name
    pub profile: Option<String>,
    /// Keys requested per listing page
    pub page_size: i32,
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            region: None,
            endpoint: None,
            profile: None,
            page_size: MAX_PAGE_SIZE,
            log_level: "warn".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| Error::configuration(format!("{}: {e}", path.display())))?;
        config.validate()?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| Error::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are usable
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(Error::configuration(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        if self.endpoint.as_deref().is_some_and(str::is_empty) {
            return Err(Error::configuration("endpoint must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.page_size, 1000);
        assert_eq!(config.log_level, "warn");
        assert!(config.region.is_none());
        assert!(config.endpoint.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(ClientConfig::load(None).unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            region = "eu-west-1"
            endpoint = "http://localhost:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.page_size, MAX_PAGE_SIZE);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_invalid_page_size() {
        for size in [0, -5, MAX_PAGE_SIZE + 1] {
            let config = ClientConfig {
                page_size: size,
                ..ClientConfig::default()
            };
            assert!(matches!(config.validate(), Err(Error::Configuration(_))));
        }
        assert!(ClientConfig::from_toml("page_size = 0").is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = ClientConfig::from_toml("page_size = \"lots\"").unwrap_err();
        assert!(err.is_invocation_error());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 250").unwrap();
        writeln!(file, "log_level = \"debug\"").unwrap();

        let config = ClientConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.page_size, 250);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
