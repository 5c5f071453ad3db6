//! workspace::tasks
//!
//! Google Tasks API v1 client.

use std::sync::Arc;

use serde_json::{json, Value};

use super::common::page_from;
use super::transport::{ApiError, Transport};
use crate::engine::paginate::Page;

const TASKS_API_BASE: &str = "https://tasks.googleapis.com/tasks/v1";

pub struct Tasks {
    transport: Arc<dyn Transport>,
}

super::service_wrapper!(Tasks);

impl Tasks {
    /// List the user's task lists.
    pub async fn list_tasklists(
        &self,
        max: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<Page<Value>, ApiError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(max) = max {
            params.push(("maxResults", max.to_string()));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        let url = format!("{}/users/@me/lists", TASKS_API_BASE);
        let response = self.transport.get(&url, &params).await?;
        Ok(page_from(&response, "items"))
    }

    /// List tasks in a list, completed ones included when asked.
    pub async fn list_tasks(
        &self,
        tasklist: &str,
        show_completed: bool,
        max: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<Page<Value>, ApiError> {
        let mut params: Vec<(&str, String)> = vec![
            ("showCompleted", show_completed.to_string()),
            ("showHidden", show_completed.to_string()),
        ];
        if let Some(max) = max {
            params.push(("maxResults", max.to_string()));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        let url = format!("{}/lists/{}/tasks", TASKS_API_BASE, tasklist);
        let response = self.transport.get(&url, &params).await?;
        Ok(page_from(&response, "items"))
    }

    /// Create a task.
    pub async fn insert_task(
        &self,
        tasklist: &str,
        title: &str,
        notes: Option<&str>,
        due: Option<&str>,
    ) -> Result<Value, ApiError> {
        let mut body = json!({ "title": title });
        if let Some(notes) = notes {
            body["notes"] = json!(notes);
        }
        if let Some(due) = due {
            body["due"] = json!(due);
        }
        let url = format!("{}/lists/{}/tasks", TASKS_API_BASE, tasklist);
        self.transport.post(&url, &body).await
    }

    /// Mark a task completed.
    pub async fn complete_task(&self, tasklist: &str, task_id: &str) -> Result<Value, ApiError> {
        let url = format!("{}/lists/{}/tasks/{}", TASKS_API_BASE, tasklist, task_id);
        self.transport
            .patch(&url, &json!({ "status": "completed" }))
            .await
    }

    /// Delete a task.
    pub async fn delete_task(&self, tasklist: &str, task_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/lists/{}/tasks/{}", TASKS_API_BASE, tasklist, task_id);
        self.transport.delete(&url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::mock::MockTransport;

    #[test]
    fn complete_patches_status() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(json!({"id": "t1", "status": "completed"}));

        tokio_test::block_on(Tasks::new(mock.clone()).complete_task("@default", "t1")).unwrap();

        let call = &mock.calls()[0];
        assert_eq!(call.method, "PATCH");
        assert!(call.url.ends_with("/lists/@default/tasks/t1"));
        assert_eq!(call.body.as_ref().unwrap()["status"], "completed");
    }

    #[test]
    fn insert_skips_absent_fields() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(json!({"id": "t2"}));

        tokio_test::block_on(Tasks::new(mock.clone()).insert_task(
            "@default",
            "buy milk",
            None,
            None,
        ))
        .unwrap();

        let body = mock.calls()[0].body.clone().unwrap();
        assert_eq!(body["title"], "buy milk");
        assert!(body.get("notes").is_none());
        assert!(body.get("due").is_none());
    }
}
