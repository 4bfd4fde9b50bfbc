//! Listing request and response model
//!
//! A [`ListRequest`] is an immutable description of one page request. The
//! request for the next page is derived from the previous one, so nothing
//! carries over between calls except what the descriptor names.

use async_trait::async_trait;
use keylist_common::{BucketName, KeyFilter, Result};
use std::time::SystemTime;

/// Parameters for fetching one listing page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRequest {
    bucket: BucketName,
    prefix: Option<String>,
    continuation_token: Option<String>,
    max_keys: Option<i32>,
}

impl ListRequest {
    /// Request for the first page of `bucket`.
    ///
    /// The filter's prefix is pushed down to the service when set.
    #[must_use]
    pub fn first(bucket: BucketName, filter: &KeyFilter, max_keys: Option<i32>) -> Self {
        Self {
            bucket,
            prefix: filter.server_prefix().map(str::to_string),
            continuation_token: None,
            max_keys,
        }
    }

    /// Request for the page that follows the one answered with `token`
    #[must_use]
    pub fn next_page(&self, token: impl Into<String>) -> Self {
        Self {
            continuation_token: Some(token.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub const fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    #[must_use]
    pub fn continuation_token(&self) -> Option<&str> {
        self.continuation_token.as_deref()
    }

    #[must_use]
    pub const fn max_keys(&self) -> Option<i32> {
        self.max_keys
    }
}

/// One object returned by a listing page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectEntry {
    /// Full object key within the bucket
    pub key: String,
    /// Object size in bytes
    pub size: u64,
    /// Last modification time, when reported
    pub last_modified: Option<SystemTime>,
}

impl ObjectEntry {
    /// Entry with only a key set
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size: 0,
            last_modified: None,
        }
    }
}

/// One page of listing results
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Entries in service order; `None` when the response carried no
    /// contents element at all
    pub contents: Option<Vec<ObjectEntry>>,
    /// Cursor for the next page; absent on the last page
    pub next_continuation_token: Option<String>,
}

impl ListPage {
    /// Page holding `keys`, followed by `next` if given
    pub fn from_keys<I, K>(keys: I, next: Option<&str>) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            contents: Some(keys.into_iter().map(ObjectEntry::new).collect()),
            next_continuation_token: next.map(str::to_string),
        }
    }

    /// Whether another page follows this one
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next_continuation_token.is_some()
    }
}

/// Source of listing pages
///
/// Implementations perform exactly one request per call and report
/// service or transport failures as errors without retrying.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the page described by `request`
    async fn list_page(&self, request: &ListRequest) -> Result<ListPage>;
}

#[async_trait]
impl<T: ListingSource + ?Sized> ListingSource for &T {
    async fn list_page(&self, request: &ListRequest) -> Result<ListPage> {
        (**self).list_page(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> BucketName {
        BucketName::new("demo").unwrap()
    }

    #[test]
    fn test_first_request() {
        let request = ListRequest::first(demo(), &KeyFilter::default(), Some(1000));
        assert_eq!(request.bucket().as_str(), "demo");
        assert_eq!(request.prefix(), None);
        assert_eq!(request.continuation_token(), None);
        assert_eq!(request.max_keys(), Some(1000));

        let request = ListRequest::first(demo(), &KeyFilter::new("a/", ".txt"), None);
        assert_eq!(request.prefix(), Some("a/"));
        assert_eq!(request.max_keys(), None);
    }

    #[test]
    fn test_next_page_leaves_previous_request_untouched() {
        let first = ListRequest::first(demo(), &KeyFilter::with_prefix("a/"), None);
        let second = first.next_page("tok1");
        let third = second.next_page("tok2");

        assert_eq!(first.continuation_token(), None);
        assert_eq!(second.continuation_token(), Some("tok1"));
        assert_eq!(third.continuation_token(), Some("tok2"));
        assert_eq!(third.prefix(), Some("a/"));
        assert_eq!(third.bucket(), first.bucket());
    }

    #[test]
    fn test_page_from_keys() {
        let page = ListPage::from_keys(["a/1.txt", "a/2.txt"], Some("tok1"));
        assert!(page.has_more());
        let keys: Vec<_> = page
            .contents
            .unwrap()
            .into_iter()
            .map(|entry| entry.key)
            .collect();
        assert_eq!(keys, ["a/1.txt", "a/2.txt"]);

        assert!(!ListPage::from_keys(Vec::<String>::new(), None).has_more());
    }
}
