//! store::tracking
//!
//! Tracking pixel configuration.
//!
//! A configured base URL turns `--track` on sends into a 1x1 image URL
//! with a fresh UUID, appended to the HTML body. The UUID is reported to
//! the caller so opens can be correlated later.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::Context;

use super::file::{read_optional, write_atomic};
use super::paths::account_dir;
use super::StoreError;

const TRACKING_FILE: &str = "tracking.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Base URL of the pixel endpoint, e.g. `https://t.example.com/p`.
    pub base_url: String,
}

/// Tracking config scoped to one account directory.
#[derive(Debug)]
pub struct TrackingStore {
    dir: PathBuf,
}

impl TrackingStore {
    pub fn open(ctx: &Context) -> Result<Self, StoreError> {
        Ok(Self {
            dir: account_dir(ctx)?,
        })
    }

    /// For tests: a store over an explicit directory.
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(TRACKING_FILE)
    }

    pub fn load(&self) -> Result<Option<TrackingConfig>, StoreError> {
        match read_optional(&self.path())? {
            Some(raw) => toml::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::Read(format!("cannot parse tracking config: {}", e))),
            None => Ok(None),
        }
    }

    pub fn save(&self, config: &TrackingConfig) -> Result<(), StoreError> {
        let raw = toml::to_string_pretty(config)
            .map_err(|e| StoreError::Write(format!("cannot serialize tracking config: {}", e)))?;
        write_atomic(&self.path(), raw.as_bytes())
    }

    /// Remove the tracking config. Idempotent.
    pub fn clear(&self) -> Result<bool, StoreError> {
        let path = self.path();
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)
            .map_err(|e| StoreError::Write(format!("cannot remove {}: {}", path.display(), e)))?;
        Ok(true)
    }
}

/// Mint a pixel URL and its correlation id from a base URL.
///
/// The id lands in the `id` query parameter; an existing query string on
/// the base URL is extended rather than replaced.
pub fn pixel_url(base_url: &str) -> (String, String) {
    let id = Uuid::new_v4().to_string();
    let base = base_url.trim_end_matches('/');
    let separator = if base.contains('?') { '&' } else { '?' };
    (format!("{}{}id={}", base, separator, id), id)
}

/// The HTML fragment appended to tracked message bodies.
pub fn pixel_html(url: &str) -> String {
    format!(
        r#"<img src="{}" width="1" height="1" alt="" style="display:none">"#,
        url
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_load_clear_round_trip() {
        let temp = TempDir::new().expect("temp dir");
        let store = TrackingStore::at(temp.path().join("default"));

        assert!(store.load().expect("load empty").is_none());

        store
            .save(&TrackingConfig {
                base_url: "https://t.example.com/p".into(),
            })
            .expect("save");
        let loaded = store.load().expect("load").expect("present");
        assert_eq!(loaded.base_url, "https://t.example.com/p");

        assert!(store.clear().expect("clear"));
        assert!(!store.clear().expect("second clear"));
    }

    #[test]
    fn pixel_url_appends_id() {
        let (url, id) = pixel_url("https://t.example.com/p/");
        assert_eq!(url, format!("https://t.example.com/p?id={}", id));
        assert_eq!(id.len(), 36);
    }

    #[test]
    fn pixel_url_extends_existing_query() {
        let (url, id) = pixel_url("https://t.example.com/p?v=1");
        assert_eq!(url, format!("https://t.example.com/p?v=1&id={}", id));
    }

    #[test]
    fn pixel_html_is_hidden_image() {
        let html = pixel_html("https://t.example.com/p?id=x");
        assert!(html.starts_with("<img src=\"https://t.example.com/p?id=x\""));
        assert!(html.contains("width=\"1\""));
    }
}
