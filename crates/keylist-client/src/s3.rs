//! S3 listing source
//!
//! Issues `ListObjectsV2` calls through the AWS SDK. Credentials come from
//! the SDK's default provider chain; retries are whatever the SDK does by
//! default.

use crate::listing::{ListPage, ListRequest, ListingSource, ObjectEntry};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::list_objects_v2::{ListObjectsV2Error, ListObjectsV2Output};
use keylist_common::{BucketName, ClientConfig, Error, Result};
use std::time::SystemTime;
use tracing::{debug, warn};

/// [`ListingSource`] backed by an S3 client
#[derive(Clone, Debug)]
pub struct S3ListingSource {
    client: Client,
}

impl S3ListingSource {
    /// Wrap an existing client
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS configuration plus `config`
    pub async fn connect(config: &ClientConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }

        let sdk_config = loader.load().await;

        // Custom endpoints are usually S3-compatible services without
        // virtual-host bucket routing
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        debug!(
            region = ?sdk_config.region(),
            endpoint = ?config.endpoint,
            "Created S3 client"
        );
        Self::new(Client::from_conf(s3_config))
    }
}

#[async_trait]
impl ListingSource for S3ListingSource {
    async fn list_page(&self, request: &ListRequest) -> Result<ListPage> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(request.bucket().as_str())
            .set_prefix(request.prefix().map(str::to_string))
            .set_continuation_token(request.continuation_token().map(str::to_string))
            .set_max_keys(request.max_keys())
            .send()
            .await
            .map_err(|e| map_list_error(request.bucket(), &e))?;

        Ok(page_from_output(output))
    }
}

/// Convert a `ListObjectsV2` response into a [`ListPage`].
///
/// The service leaves out the contents element entirely for an empty
/// listing and reports `KeyCount` 0; only that case is read as an empty
/// page.
fn page_from_output(output: ListObjectsV2Output) -> ListPage {
    let contents = match output.contents {
        Some(objects) => Some(
            objects
                .into_iter()
                .filter_map(|object| {
                    let Some(key) = object.key else {
                        warn!("Skipping listed object without a key");
                        return None;
                    };
                    Some(ObjectEntry {
                        key,
                        size: object
                            .size
                            .and_then(|size| u64::try_from(size).ok())
                            .unwrap_or(0),
                        last_modified: object
                            .last_modified
                            .and_then(|time| SystemTime::try_from(time).ok()),
                    })
                })
                .collect(),
        ),
        None if output.key_count == Some(0) => Some(Vec::new()),
        None => None,
    };

    ListPage {
        contents,
        next_continuation_token: output.next_continuation_token,
    }
}

fn map_list_error(bucket: &BucketName, err: &SdkError<ListObjectsV2Error>) -> Error {
    if let Some(service_err) = err.as_service_error() {
        if service_err.is_no_such_bucket() || service_err.code() == Some("NoSuchBucket") {
            return Error::BucketNotFound(bucket.to_string());
        }
        if service_err.code() == Some("AccessDenied") {
            return Error::AccessDenied(bucket.to_string());
        }
        let message = service_err
            .message()
            .map_or_else(|| DisplayErrorContext(err).to_string(), str::to_string);
        return Error::service(service_err.code().unwrap_or("Unknown"), message);
    }

    match err {
        SdkError::TimeoutError(_) => Error::Timeout,
        SdkError::DispatchFailure(_) => {
            Error::ConnectionFailed(DisplayErrorContext(err).to_string())
        }
        _ => Error::service("Unknown", DisplayErrorContext(err).to_string()),
    }
}
