//! keylist Client - Object key listing
//!
//! This crate turns the paginated object-storage listing API into a lazy
//! stream of keys.

pub mod enumerator;
pub mod listing;
pub mod s3;

// Re-exports
pub use enumerator::KeyEnumerator;
pub use listing::{ListPage, ListRequest, ListingSource, ObjectEntry};
pub use s3::S3ListingSource;
