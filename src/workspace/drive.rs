//! workspace::drive
//!
//! Google Drive API v3 client.

use std::sync::Arc;

use serde_json::Value;

use super::common::page_from;
use super::transport::{ApiError, Transport};
use crate::engine::paginate::Page;

const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

const FILE_FIELDS: &str = "id,name,mimeType,size,modifiedTime,owners(emailAddress),webViewLink";

pub struct Drive {
    transport: Arc<dyn Transport>,
}

super::service_wrapper!(Drive);

impl Drive {
    /// List files matching a Drive query expression.
    pub async fn list_files(
        &self,
        query: Option<&str>,
        max: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<Page<Value>, ApiError> {
        let mut params: Vec<(&str, String)> = vec![(
            "fields",
            format!("nextPageToken,files({})", FILE_FIELDS),
        )];
        if let Some(q) = query {
            params.push(("q", q.to_string()));
        }
        if let Some(max) = max {
            params.push(("pageSize", max.to_string()));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        let url = format!("{}/files", DRIVE_API_BASE);
        let response = self.transport.get(&url, &params).await?;
        Ok(page_from(&response, "files"))
    }

    /// Get file metadata.
    pub async fn get_file(&self, id: &str) -> Result<Value, ApiError> {
        let url = format!("{}/files/{}", DRIVE_API_BASE, id);
        let params = vec![("fields", FILE_FIELDS.to_string())];
        self.transport.get(&url, &params).await
    }

    /// Download file content (`alt=media`).
    pub async fn download(&self, id: &str) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}/files/{}", DRIVE_API_BASE, id);
        let params = vec![("alt", "media".to_string())];
        self.transport.get_bytes(&url, &params).await
    }

    /// Permanently delete a file.
    pub async fn delete_file(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/files/{}", DRIVE_API_BASE, id);
        self.transport.delete(&url).await?;
        Ok(())
    }

    /// Storage quota and user info.
    pub async fn about(&self) -> Result<Value, ApiError> {
        let url = format!("{}/about", DRIVE_API_BASE);
        let params = vec![("fields", "storageQuota,user".to_string())];
        self.transport.get(&url, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::mock::MockTransport;
    use serde_json::json;

    #[test]
    fn list_files_requests_fields() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(json!({"files": [{"id": "f1", "name": "doc"}]}));

        let page = tokio_test::block_on(Drive::new(mock.clone()).list_files(
            Some("name contains 'doc'"),
            Some(5),
            None,
        ))
        .unwrap();

        assert_eq!(page.items.len(), 1);
        let call = &mock.calls()[0];
        assert!(call.url.ends_with("/drive/v3/files"));
        assert!(call
            .query
            .contains(&("q".into(), "name contains 'doc'".into())));
        assert!(call.query.contains(&("pageSize".into(), "5".into())));
        assert!(call.query.iter().any(|(k, _)| k == "fields"));
    }

    #[test]
    fn download_requests_media() {
        let mock = Arc::new(MockTransport::new());
        mock.push_bytes(b"file bytes".to_vec());

        let bytes = tokio_test::block_on(Drive::new(mock.clone()).download("f1")).unwrap();
        assert_eq!(bytes, b"file bytes");
        assert!(mock.calls()[0]
            .query
            .contains(&("alt".into(), "media".into())));
    }
}
