//! workspace::gmail
//!
//! Gmail API v1 client.
//!
//! Thin adapters over the transport: list/search messages, fetch message
//! details and attachments, send raw RFC822 payloads, manage labels and
//! drafts, and read send-as aliases.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use super::common::{extract_array, page_from};
use super::transport::{ApiError, Transport};
use crate::engine::paginate::Page;

const GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1";

/// Message payload detail level for `messages get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    Full,
    Metadata,
    Minimal,
    Raw,
}

impl MessageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageFormat::Full => "full",
            MessageFormat::Metadata => "metadata",
            MessageFormat::Minimal => "minimal",
            MessageFormat::Raw => "raw",
        }
    }
}

pub struct Gmail {
    transport: Arc<dyn Transport>,
}

super::service_wrapper!(Gmail);

impl Gmail {
    fn url(&self, path: &str) -> String {
        format!("{}/users/me/{}", GMAIL_API_BASE, path)
    }

    /// List message ids matching a Gmail search query.
    pub async fn list_messages(
        &self,
        query: Option<&str>,
        label_ids: &[String],
        max: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<Page<Value>, ApiError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(q) = query {
            params.push(("q", q.to_string()));
        }
        for label in label_ids {
            params.push(("labelIds", label.clone()));
        }
        if let Some(max) = max {
            params.push(("maxResults", max.to_string()));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        let response = self.transport.get(&self.url("messages"), &params).await?;
        let page = page_from(&response, "messages");
        debug!(count = page.items.len(), "listed messages");
        Ok(page)
    }

    /// Get a message by id.
    pub async fn get_message(&self, id: &str, format: MessageFormat) -> Result<Value, ApiError> {
        let params = vec![("format", format.as_str().to_string())];
        self.transport
            .get(&self.url(&format!("messages/{}", id)), &params)
            .await
    }

    /// Send a base64url-encoded RFC822 message.
    pub async fn send_raw(&self, raw: &str) -> Result<Value, ApiError> {
        self.transport
            .post(&self.url("messages/send"), &json!({ "raw": raw }))
            .await
    }

    /// Create a draft from a base64url-encoded RFC822 message.
    pub async fn create_draft(&self, raw: &str) -> Result<Value, ApiError> {
        self.transport
            .post(&self.url("drafts"), &json!({ "message": { "raw": raw } }))
            .await
    }

    /// Move a message to trash.
    pub async fn trash_message(&self, id: &str) -> Result<Value, ApiError> {
        self.transport
            .post(&self.url(&format!("messages/{}/trash", id)), &json!({}))
            .await
    }

    /// Permanently delete a message.
    pub async fn delete_message(&self, id: &str) -> Result<(), ApiError> {
        self.transport
            .delete(&self.url(&format!("messages/{}", id)))
            .await?;
        Ok(())
    }

    /// Add/remove labels on a message.
    pub async fn modify_message(
        &self,
        id: &str,
        add: &[String],
        remove: &[String],
    ) -> Result<Value, ApiError> {
        let mut body = json!({});
        if !add.is_empty() {
            body["addLabelIds"] = json!(add);
        }
        if !remove.is_empty() {
            body["removeLabelIds"] = json!(remove);
        }
        self.transport
            .post(&self.url(&format!("messages/{}/modify", id)), &body)
            .await
    }

    /// List all labels.
    pub async fn list_labels(&self) -> Result<Vec<Value>, ApiError> {
        let response = self.transport.get(&self.url("labels"), &[]).await?;
        Ok(extract_array(&response, "labels"))
    }

    /// Fetch an attachment body (base64url data plus size).
    pub async fn get_attachment(
        &self,
        message_id: &str,
        attachment_id: &str,
    ) -> Result<Value, ApiError> {
        self.transport
            .get(
                &self.url(&format!(
                    "messages/{}/attachments/{}",
                    message_id, attachment_id
                )),
                &[],
            )
            .await
    }

    /// List send-as aliases for the account.
    pub async fn list_send_as(&self) -> Result<Vec<Value>, ApiError> {
        let response = self.transport.get(&self.url("settings/sendAs"), &[]).await?;
        Ok(extract_array(&response, "sendAs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::mock::MockTransport;

    fn gmail(mock: Arc<MockTransport>) -> Gmail {
        Gmail::new(mock)
    }

    #[test]
    fn list_messages_builds_query() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(json!({
            "messages": [{"id": "m1"}],
            "nextPageToken": "tok",
        }));

        let page = tokio_test::block_on(gmail(mock.clone()).list_messages(
            Some("is:unread"),
            &["INBOX".to_string()],
            Some(10),
            Some("prev"),
        ))
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.next.as_deref(), Some("tok"));

        let call = &mock.calls()[0];
        assert!(call.url.ends_with("/users/me/messages"));
        assert!(call.query.contains(&("q".into(), "is:unread".into())));
        assert!(call.query.contains(&("labelIds".into(), "INBOX".into())));
        assert!(call.query.contains(&("maxResults".into(), "10".into())));
        assert!(call.query.contains(&("pageToken".into(), "prev".into())));
    }

    #[test]
    fn send_raw_posts_payload() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(json!({"id": "sent-1"}));

        let sent = tokio_test::block_on(gmail(mock.clone()).send_raw("ZW5jb2RlZA")).unwrap();
        assert_eq!(sent["id"], "sent-1");

        let call = &mock.calls()[0];
        assert_eq!(call.method, "POST");
        assert!(call.url.ends_with("/users/me/messages/send"));
        assert_eq!(call.body.as_ref().unwrap()["raw"], "ZW5jb2RlZA");
    }

    #[test]
    fn modify_skips_empty_lists() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(json!({"id": "m1"}));

        tokio_test::block_on(gmail(mock.clone()).modify_message(
            "m1",
            &["STARRED".to_string()],
            &[],
        ))
        .unwrap();

        let body = mock.calls()[0].body.clone().unwrap();
        assert_eq!(body["addLabelIds"], json!(["STARRED"]));
        assert!(body.get("removeLabelIds").is_none());
    }

    #[test]
    fn delete_uses_delete_verb() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(json!({}));
        tokio_test::block_on(gmail(mock.clone()).delete_message("m9")).unwrap();
        let call = &mock.calls()[0];
        assert_eq!(call.method, "DELETE");
        assert!(call.url.ends_with("/users/me/messages/m9"));
    }
}
