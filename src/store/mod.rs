//! store
//!
//! Per-account configuration on disk.
//!
//! # Layout
//!
//! Everything lives under `~/.gogcli/<account>/`:
//!
//! - `service-account.json`: installed service-account key (0600)
//! - `key.toml`: key metadata (impersonation subject, install time)
//! - `tracking.toml`: tracking pixel base URL
//!
//! # Security
//!
//! - Key files are written with 0600 permissions on Unix
//! - All writes are atomic (write to temp file, then rename)
//! - Key contents are never logged or included in error messages

pub mod file;
pub mod keys;
pub mod paths;
pub mod tracking;

pub use keys::{KeyStatus, KeyStore};
pub use tracking::TrackingStore;

use thiserror::Error;

/// Errors from the on-disk configuration store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Read(String),

    #[error("store write failed: {0}")]
    Write(String),

    #[error("{0}")]
    Invalid(String),
}
