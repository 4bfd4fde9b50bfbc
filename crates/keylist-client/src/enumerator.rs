//! Paginated key enumeration
//!
//! [`KeyEnumerator`] walks a bucket listing page by page and yields the
//! keys that pass a [`KeyFilter`], following continuation tokens until a
//! page arrives without one.

use crate::listing::{ListPage, ListRequest, ListingSource};
use async_stream::try_stream;
use futures::{Stream, TryStreamExt};
use keylist_common::{BucketName, Error, KeyFilter, Result};
use tracing::debug;

/// Lazily enumerates the keys of a bucket
pub struct KeyEnumerator<S> {
    source: S,
    page_size: Option<i32>,
}

impl<S: ListingSource> KeyEnumerator<S> {
    /// Create an enumerator that lets the service pick the page size
    pub const fn new(source: S) -> Self {
        Self {
            source,
            page_size: None,
        }
    }

    /// Ask for at most `page_size` entries per page
    #[must_use]
    pub const fn with_page_size(mut self, page_size: i32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Stream the keys of `bucket` that match `filter`.
    ///
    /// The stream issues one request per page, only when the previous
    /// page has been consumed. The first error ends the stream; keys
    /// already yielded stay yielded. A page without contents is reported
    /// as [`Error::MissingContents`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// use futures::{TryStreamExt, pin_mut};
    ///
    /// let keys = enumerator.enumerate(&bucket, &KeyFilter::with_suffix(".txt"));
    /// pin_mut!(keys);
    ///
    /// while let Some(key) = keys.try_next().await? {
    ///     println!("{key}");
    /// }
    /// ```
    pub fn enumerate<'a>(
        &'a self,
        bucket: &'a BucketName,
        filter: &'a KeyFilter,
    ) -> impl Stream<Item = Result<String>> + Send + 'a {
        try_stream! {
            let mut request = ListRequest::first(bucket.clone(), filter, self.page_size);
            let mut page_number: u64 = 0;

            loop {
                page_number += 1;
                let ListPage {
                    contents,
                    next_continuation_token,
                } = self.source.list_page(&request).await?;

                let entries = contents.ok_or_else(|| Error::MissingContents {
                    bucket: bucket.to_string(),
                })?;
                debug!(
                    bucket = %bucket,
                    page = page_number,
                    entries = entries.len(),
                    more = next_continuation_token.is_some(),
                    "Fetched listing page"
                );

                for entry in entries {
                    if filter.matches(&entry.key) {
                        yield entry.key;
                    }
                }

                match next_continuation_token {
                    Some(token) => request = request.next_page(token),
                    None => break,
                }
            }
        }
    }

    /// Drain [`enumerate`](Self::enumerate) into a vector
    pub async fn collect_keys(
        &self,
        bucket: &BucketName,
        filter: &KeyFilter,
    ) -> Result<Vec<String>> {
        self.enumerate(bucket, filter).try_collect().await
    }
}
