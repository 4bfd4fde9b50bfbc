//! CLI argument definitions for keylist-cli.

use clap::Parser;
use keylist_common::{BucketName, ClientConfig, Error, KeyFilter, Result};
use std::path::PathBuf;

const USAGE: &str = "keylist-cli [OPTIONS] <BUCKET>";

/// List the object keys of an S3 bucket.
///
/// Prints the bucket name followed by every matching key, one per line.
/// Credentials are resolved by the AWS SDK's default provider chain.
#[derive(Parser, Debug)]
#[command(name = "keylist-cli")]
#[command(version, about, long_about = None)]
#[command(override_usage = USAGE)]
pub struct Args {
    /// Bucket to list (exactly one)
    #[arg(value_name = "BUCKET")]
    pub buckets: Vec<String>,

    /// Only list keys starting with this prefix
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Only list keys ending with this suffix
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// AWS region
    #[arg(long)]
    pub region: Option<String>,

    /// Custom S3 endpoint URL (for S3-compatible services)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// AWS profile name
    #[arg(long)]
    pub profile: Option<String>,

    /// Keys requested per listing page (1-1000)
    #[arg(long)]
    pub page_size: Option<i32>,

    /// Configuration file path (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Validated request to list one bucket
#[derive(Debug)]
pub struct Invocation {
    pub bucket: BucketName,
    pub filter: KeyFilter,
    pub config: ClientConfig,
}

impl Args {
    /// Validate the arguments and merge them over the config file.
    ///
    /// Flags take precedence over file values.
    pub fn into_invocation(self) -> Result<Invocation> {
        let [bucket] = <[String; 1]>::try_from(self.buckets).map_err(|given| {
            Error::invalid_argument(format!(
                "expected exactly one bucket name, got {}\nUsage: {USAGE}",
                given.len()
            ))
        })?;
        let bucket = BucketName::new(bucket)?;

        let mut config = ClientConfig::load(self.config.as_deref())?;
        if self.region.is_some() {
            config.region = self.region;
        }
        if self.endpoint.is_some() {
            config.endpoint = self.endpoint;
        }
        if self.profile.is_some() {
            config.profile = self.profile;
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }
        config.validate()?;

        Ok(Invocation {
            bucket,
            filter: KeyFilter::new(self.prefix, self.suffix),
            config,
        })
    }
}
