//! workspace::transport
//!
//! The transport seam between command handlers and Google's REST APIs.
//!
//! # Design
//!
//! The `Transport` trait is the single narrow capability interface for
//! remote access: services are thin structs over a `dyn Transport`, so
//! tests substitute a scripted transport instead of patching constructors.
//! The trait is async because every operation involves network I/O.
//!
//! # Error Handling
//!
//! All methods return `Result<_, ApiError>`. Callers should handle:
//! - `AuthRequired` / `AuthFailed`: no usable credential
//! - `NotFound`: resource doesn't exist (idempotent deletes treat this as success)
//! - `RateLimited` / `Retryable`: surface to the caller, never retried here
//! - `Api`: display the message to the user
//! - `Network`: check connectivity

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors from Google API operations.
///
/// These map to the common failure modes of the Workspace REST APIs and
/// carry enough shape for exit-code mapping.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No credential is configured at all.
    #[error("authentication required; set GOG_TOKEN or configure a service-account key")]
    AuthRequired,

    /// The credential was rejected (invalid, expired).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The credential lacks permission for the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// A transient server-side failure the caller may retry.
    #[error("retryable error: {status} - {message}")]
    Retryable { status: u16, message: String },

    /// Any other API error.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),
}

/// Authenticated HTTP access to Google REST endpoints.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a JSON resource.
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Value, ApiError>;

    /// GET raw bytes (media downloads).
    async fn get_bytes(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>, ApiError>;

    /// POST a JSON body.
    async fn post(&self, url: &str, body: &Value) -> Result<Value, ApiError>;

    /// PUT a JSON body.
    async fn put(&self, url: &str, body: &Value) -> Result<Value, ApiError>;

    /// PATCH a JSON body.
    async fn patch(&self, url: &str, body: &Value) -> Result<Value, ApiError>;

    /// DELETE a resource. Empty bodies yield an empty JSON object.
    async fn delete(&self, url: &str) -> Result<Value, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        assert_eq!(
            format!("{}", ApiError::AuthFailed("expired token".into())),
            "authentication failed: expired token"
        );
        assert_eq!(
            format!("{}", ApiError::NotFound("message m1".into())),
            "not found: message m1"
        );
        assert_eq!(format!("{}", ApiError::RateLimited), "rate limited");
        assert_eq!(
            format!(
                "{}",
                ApiError::Retryable {
                    status: 503,
                    message: "backend unavailable".into()
                }
            ),
            "retryable error: 503 - backend unavailable"
        );
    }
}
