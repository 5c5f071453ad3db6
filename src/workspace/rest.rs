//! workspace::rest
//!
//! Authenticated HTTP transport for Google REST APIs.
//!
//! # Design
//!
//! `GoogleClient` injects a bearer token into every request and maps
//! responses according to Google API REST conventions: errors arrive as
//! `{"error": {"code": ..., "message": ...}}` and the HTTP status selects
//! the [`ApiError`] variant. No retries happen at this layer; transient
//! failures surface as `Retryable` for the caller to act on.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::transport::{ApiError, Transport};

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "gogcli";

/// Google API HTTP client with bearer-token injection.
pub struct GoogleClient {
    client: Client,
    token: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GoogleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleClient").finish_non_exhaustive()
    }
}

impl GoogleClient {
    /// Create a client with an OAuth access token.
    pub fn new(token: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token: token.into(),
        })
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let response = self.send(builder).await?;
        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read response body: {}", e)))?;

        // Empty successful responses (e.g. DELETE) become an empty object.
        if status.is_success() && body.is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        let parsed: Value = serde_json::from_str(&body).map_err(|e| ApiError::Api {
            status: status.as_u16(),
            message: format!("failed to parse JSON response: {}", e),
        })?;

        if !status.is_success() {
            return Err(map_error(status, &parsed));
        }
        Ok(parsed)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        debug!("executing Google API request");
        let response = builder
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!(status = %response.status(), "response received");
        Ok(response)
    }
}

/// Map a non-success response to an `ApiError`.
///
/// Google APIs return errors as `{"error": {"code": ..., "message": ...}}`;
/// the message is extracted when present, the HTTP status otherwise.
fn map_error(status: StatusCode, body: &Value) -> ApiError {
    let message = body
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .unwrap_or("unknown error")
        .to_string();

    match status {
        StatusCode::UNAUTHORIZED => ApiError::AuthFailed(message),
        StatusCode::FORBIDDEN => ApiError::PermissionDenied(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => {
            warn!("rate limited by Google API");
            ApiError::RateLimited
        }
        StatusCode::REQUEST_TIMEOUT => ApiError::Retryable {
            status: status.as_u16(),
            message,
        },
        _ if status.is_server_error() => ApiError::Retryable {
            status: status.as_u16(),
            message,
        },
        _ => ApiError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl Transport for GoogleClient {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        self.execute(self.client.get(url).query(query)).await
    }

    async fn get_bytes(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>, ApiError> {
        let response = self.send(self.client.get(url).query(query)).await?;
        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(map_error(status, &body));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read response body: {}", e)))?;
        Ok(bytes.to_vec())
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        self.execute(self.client.post(url).json(body)).await
    }

    async fn put(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        self.execute(self.client.put(url).json(body)).await
    }

    async fn patch(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        self.execute(self.client.patch(url).json(body)).await
    }

    async fn delete(&self, url: &str) -> Result<Value, ApiError> {
        self.execute(self.client.delete(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_mapping_uses_google_error_shape() {
        let body = json!({"error": {"code": 404, "message": "Message not found"}});
        match map_error(StatusCode::NOT_FOUND, &body) {
            ApiError::NotFound(msg) => assert_eq!(msg, "Message not found"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn server_errors_are_retryable() {
        let body = json!({"error": {"message": "Backend Error"}});
        match map_error(StatusCode::SERVICE_UNAVAILABLE, &body) {
            ApiError::Retryable { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Backend Error");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn unauthorized_is_auth_failed() {
        let body = json!({"error": {"message": "Invalid Credentials"}});
        assert!(matches!(
            map_error(StatusCode::UNAUTHORIZED, &body),
            ApiError::AuthFailed(_)
        ));
    }

    #[test]
    fn missing_error_shape_falls_back() {
        match map_error(StatusCode::BAD_REQUEST, &Value::Null) {
            ApiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "unknown error");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
