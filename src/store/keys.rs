//! store::keys
//!
//! Service-account key management.
//!
//! Keys are installed by copying the JSON key file into the account
//! directory; metadata (impersonation subject, install time) lives next
//! to it in `key.toml`. Nothing here exchanges the key for a token.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::Context;

use super::file::{read_optional, write_atomic};
use super::paths::account_dir;
use super::StoreError;

const KEY_FILE: &str = "service-account.json";
const KEY_META_FILE: &str = "key.toml";

/// Metadata stored alongside an installed key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyMeta {
    /// Email to impersonate with domain-wide delegation, if any.
    pub subject: Option<String>,
    /// When the key was installed.
    pub installed_at: DateTime<Utc>,
}

/// What `auth key status` reports.
#[derive(Debug, Clone, Serialize)]
pub struct KeyStatus {
    pub present: bool,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_at: Option<DateTime<Utc>>,
}

/// Key file store scoped to one account directory.
#[derive(Debug)]
pub struct KeyStore {
    dir: PathBuf,
}

impl KeyStore {
    pub fn open(ctx: &Context) -> Result<Self, StoreError> {
        Ok(Self {
            dir: account_dir(ctx)?,
        })
    }

    /// For tests: a store over an explicit directory.
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self) -> PathBuf {
        self.dir.join(KEY_FILE)
    }

    fn meta_path(&self) -> PathBuf {
        self.dir.join(KEY_META_FILE)
    }

    /// Install a key from a source JSON file.
    ///
    /// The source must parse as a service-account key (JSON object with a
    /// `client_email` field); the check catches accidentally pointing at
    /// the wrong file before anything is copied.
    pub fn install(&self, source: &Path, subject: Option<String>) -> Result<KeyStatus, StoreError> {
        let content = fs::read_to_string(source)
            .map_err(|e| StoreError::Read(format!("cannot read key file: {}", e)))?;
        let parsed: Value = serde_json::from_str(&content)
            .map_err(|e| StoreError::Invalid(format!("key file is not valid JSON: {}", e)))?;
        if parsed.get("client_email").and_then(Value::as_str).is_none() {
            return Err(StoreError::Invalid(
                "key file has no client_email field; is it a service-account key?".into(),
            ));
        }

        write_atomic(&self.key_path(), content.as_bytes())?;

        let meta = KeyMeta {
            subject,
            installed_at: Utc::now(),
        };
        let meta_toml = toml::to_string_pretty(&meta)
            .map_err(|e| StoreError::Write(format!("cannot serialize key metadata: {}", e)))?;
        write_atomic(&self.meta_path(), meta_toml.as_bytes())?;

        self.status()
    }

    /// Report whether a key is installed and what it identifies as.
    pub fn status(&self) -> Result<KeyStatus, StoreError> {
        let path = self.key_path();
        let Some(content) = read_optional(&path)? else {
            return Ok(KeyStatus {
                present: false,
                path,
                client_email: None,
                subject: None,
                installed_at: None,
            });
        };

        let client_email = serde_json::from_str::<Value>(&content)
            .ok()
            .and_then(|v| v.get("client_email").and_then(Value::as_str).map(String::from));

        let meta: Option<KeyMeta> = match read_optional(&self.meta_path())? {
            Some(raw) => toml::from_str(&raw)
                .map_err(|e| StoreError::Read(format!("cannot parse key metadata: {}", e)))?,
            None => None,
        };

        Ok(KeyStatus {
            present: true,
            path,
            client_email,
            subject: meta.as_ref().and_then(|m| m.subject.clone()),
            installed_at: meta.map(|m| m.installed_at),
        })
    }

    /// Remove the installed key and its metadata. Idempotent.
    pub fn unset(&self) -> Result<bool, StoreError> {
        let existed = self.key_path().exists();
        for path in [self.key_path(), self.meta_path()] {
            if path.exists() {
                fs::remove_file(&path)
                    .map_err(|e| StoreError::Write(format!("cannot remove {}: {}", path.display(), e)))?;
            }
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_key(dir: &Path) -> PathBuf {
        let source = dir.join("source-key.json");
        fs::write(
            &source,
            r#"{"type": "service_account", "client_email": "svc@proj.iam.gserviceaccount.com", "private_key": "---"}"#,
        )
        .expect("write source key");
        source
    }

    #[test]
    fn install_then_status() {
        let temp = TempDir::new().expect("temp dir");
        let source = write_key(temp.path());
        let store = KeyStore::at(temp.path().join("default"));

        let status = store
            .install(&source, Some("admin@example.com".into()))
            .expect("install");
        assert!(status.present);
        assert_eq!(
            status.client_email.as_deref(),
            Some("svc@proj.iam.gserviceaccount.com")
        );
        assert_eq!(status.subject.as_deref(), Some("admin@example.com"));
        assert!(status.installed_at.is_some());
    }

    #[test]
    fn install_rejects_non_key_json() {
        let temp = TempDir::new().expect("temp dir");
        let source = temp.path().join("not-a-key.json");
        fs::write(&source, r#"{"hello": "world"}"#).expect("write");

        let store = KeyStore::at(temp.path().join("default"));
        let err = store.install(&source, None).unwrap_err();
        assert!(err.to_string().contains("client_email"));
    }

    #[test]
    fn status_without_key() {
        let temp = TempDir::new().expect("temp dir");
        let store = KeyStore::at(temp.path().join("default"));
        let status = store.status().expect("status");
        assert!(!status.present);
        assert!(status.client_email.is_none());
    }

    #[test]
    fn unset_is_idempotent() {
        let temp = TempDir::new().expect("temp dir");
        let source = write_key(temp.path());
        let store = KeyStore::at(temp.path().join("default"));

        store.install(&source, None).expect("install");
        assert!(store.unset().expect("first unset"));
        assert!(!store.unset().expect("second unset"));
        assert!(!store.status().expect("status").present);
    }
}
