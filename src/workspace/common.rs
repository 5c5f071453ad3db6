//! workspace::common
//!
//! Shared helpers for unpacking Google list responses.

use serde_json::Value;

use crate::engine::paginate::Page;

/// Extract an array field from a response, empty when absent.
pub fn extract_array(response: &Value, key: &str) -> Vec<Value> {
    response
        .get(key)
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default()
}

/// Build a [`Page`] from a list response.
///
/// Google list endpoints keep items under a service-specific key
/// (`messages`, `files`, `items`, ...) next to an optional `nextPageToken`.
pub fn page_from(response: &Value, items_key: &str) -> Page<Value> {
    let next = response
        .get("nextPageToken")
        .and_then(|v| v.as_str())
        .map(String::from);
    Page::new(extract_array(response, items_key), next)
}

/// Read a string field off an object, empty when absent.
pub fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}
