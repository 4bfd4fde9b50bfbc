//! keylist Common - Shared types and utilities
//!
//! This crate provides the error type, bucket and filter types, and the
//! client configuration shared by the listing client and the CLI.

pub mod config;
pub mod error;
pub mod types;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use types::*;
