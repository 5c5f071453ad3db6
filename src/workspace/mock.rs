//! workspace::mock
//!
//! Scripted transport for tests.
//!
//! # Design
//!
//! `MockTransport` returns queued responses in order and records every call
//! it receives. Tests use it two ways: to script multi-page listings, and
//! to assert that dry-run paths never reach the transport at all.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::transport::{ApiError, Transport};

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// HTTP method name, uppercased.
    pub method: String,
    /// Request URL (without query).
    pub url: String,
    /// Query parameters, in request order.
    pub query: Vec<(String, String)>,
    /// JSON body for POST/PUT/PATCH.
    pub body: Option<Value>,
}

/// A transport that replays queued responses and records calls.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    byte_responses: Mutex<VecDeque<Result<Vec<u8>, ApiError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON response.
    pub fn push_json(&self, value: Value) {
        self.responses.lock().unwrap().push_back(Ok(value));
    }

    /// Queue an error response.
    pub fn push_error(&self, err: ApiError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    /// Queue a successful byte response for `get_bytes`.
    pub fn push_bytes(&self, bytes: Vec<u8>) {
        self.byte_responses.lock().unwrap().push_back(Ok(bytes));
    }

    /// All calls recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls recorded so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, method: &str, url: &str, query: &[(&str, String)], body: Option<&Value>) {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.to_string(),
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            body: body.cloned(),
        });
    }

    fn next_response(&self) -> Result<Value, ApiError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ApiError::Api {
                    status: 0,
                    message: "mock transport: no response queued".to_string(),
                })
            })
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        self.record("GET", url, query, None);
        self.next_response()
    }

    async fn get_bytes(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>, ApiError> {
        self.record("GET", url, query, None);
        self.byte_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ApiError::Api {
                    status: 0,
                    message: "mock transport: no byte response queued".to_string(),
                })
            })
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        self.record("POST", url, &[], Some(body));
        self.next_response()
    }

    async fn put(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        self.record("PUT", url, &[], Some(body));
        self.next_response()
    }

    async fn patch(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        self.record("PATCH", url, &[], Some(body));
        self.next_response()
    }

    async fn delete(&self, url: &str) -> Result<Value, ApiError> {
        self.record("DELETE", url, &[], None);
        self.next_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replays_responses_in_order() {
        let mock = MockTransport::new();
        mock.push_json(json!({"first": 1}));
        mock.push_json(json!({"second": 2}));

        tokio_test::block_on(async {
            let a = mock.get("https://example.test/a", &[]).await.unwrap();
            let b = mock.get("https://example.test/b", &[]).await.unwrap();
            assert_eq!(a["first"], 1);
            assert_eq!(b["second"], 2);
        });

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].url, "https://example.test/a");
        assert_eq!(calls[1].url, "https://example.test/b");
    }

    #[test]
    fn exhausted_queue_errors() {
        let mock = MockTransport::new();
        let err = tokio_test::block_on(mock.delete("https://example.test/x")).unwrap_err();
        assert!(err.to_string().contains("no response queued"));
    }

    #[test]
    fn records_post_bodies() {
        let mock = MockTransport::new();
        mock.push_json(json!({}));
        tokio_test::block_on(mock.post("https://example.test", &json!({"raw": "abc"}))).unwrap();
        assert_eq!(mock.calls()[0].body, Some(json!({"raw": "abc"})));
    }
}
