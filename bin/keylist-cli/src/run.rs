//! Listing execution and output.

use crate::args::Invocation;
use anyhow::Result;
use futures::{TryStreamExt, pin_mut};
use keylist_client::{KeyEnumerator, ListingSource, S3ListingSource};
use keylist_common::{BucketName, KeyFilter};
use std::io::Write;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging.
///
/// `RUST_LOG` wins over `log_level`. Logs go to stderr so stdout only
/// carries the listing.
pub fn init_logging(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// List the invocation's bucket to stdout.
///
/// Returns the number of keys printed.
pub async fn execute(invocation: Invocation) -> Result<u64> {
    let Invocation {
        bucket,
        filter,
        config,
    } = invocation;

    info!("Listing bucket {bucket}");
    let source = S3ListingSource::connect(&config).await;
    let enumerator = KeyEnumerator::new(source).with_page_size(config.page_size);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let count = print_keys(&enumerator, &bucket, &filter, &mut out).await?;
    out.flush()?;

    info!("Listed {count} keys from {bucket}");
    Ok(count)
}

/// Write the bucket header and then every matching key, one per line.
///
/// Keys are written as pages arrive.
pub async fn print_keys<S, W>(
    enumerator: &KeyEnumerator<S>,
    bucket: &BucketName,
    filter: &KeyFilter,
    out: &mut W,
) -> Result<u64>
where
    S: ListingSource,
    W: Write,
{
    writeln!(out, "S3 bucket: {bucket}")?;

    let keys = enumerator.enumerate(bucket, filter);
    pin_mut!(keys);

    let mut count = 0;
    while let Some(key) = keys.try_next().await? {
        writeln!(out, "{key}")?;
        count += 1;
    }
    Ok(count)
}
