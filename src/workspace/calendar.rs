//! workspace::calendar
//!
//! Google Calendar API v3 client.

use std::sync::Arc;

use serde_json::Value;

use super::common::page_from;
use super::transport::{ApiError, Transport};
use crate::engine::paginate::Page;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

pub struct Calendar {
    transport: Arc<dyn Transport>,
}

super::service_wrapper!(Calendar);

impl Calendar {
    /// List the user's calendars.
    pub async fn list_calendars(
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
        let url = format!("{}/users/me/calendarList", CALENDAR_API_BASE);
        let response = self.transport.get(&url, &params).await?;
        Ok(page_from(&response, "items"))
    }

    /// List events on a calendar; `primary` names the default calendar.
    #[allow(clippy::too_many_arguments)]
    pub async fn list_events(
        &self,
        calendar_id: &str,
        time_min: Option<&str>,
        time_max: Option<&str>,
        query: Option<&str>,
        max: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<Page<Value>, ApiError> {
        let mut params: Vec<(&str, String)> = vec![
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ];
        if let Some(min) = time_min {
            params.push(("timeMin", min.to_string()));
        }
        if let Some(max_time) = time_max {
            params.push(("timeMax", max_time.to_string()));
        }
        if let Some(q) = query {
            params.push(("q", q.to_string()));
        }
        if let Some(max) = max {
            params.push(("maxResults", max.to_string()));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        let url = format!("{}/calendars/{}/events", CALENDAR_API_BASE, calendar_id);
        let response = self.transport.get(&url, &params).await?;
        Ok(page_from(&response, "items"))
    }

    /// Get a single event.
    pub async fn get_event(&self, calendar_id: &str, event_id: &str) -> Result<Value, ApiError> {
        let url = format!(
            "{}/calendars/{}/events/{}",
            CALENDAR_API_BASE, calendar_id, event_id
        );
        self.transport.get(&url, &[]).await
    }

    /// Create an event from a request body.
    pub async fn create_event(&self, calendar_id: &str, event: &Value) -> Result<Value, ApiError> {
        let url = format!("{}/calendars/{}/events", CALENDAR_API_BASE, calendar_id);
        self.transport.post(&url, event).await
    }

    /// Delete an event.
    pub async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<(), ApiError> {
        let url = format!(
            "{}/calendars/{}/events/{}",
            CALENDAR_API_BASE, calendar_id, event_id
        );
        self.transport.delete(&url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::workspace::mock::MockTransport;

    #[test]
    fn list_events_expands_recurring() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(json!({"items": [{"id": "e1"}]}));

        let page = tokio_test::block_on(Calendar::new(mock.clone()).list_events(
            "primary",
            Some("2026-01-01T00:00:00Z"),
            None,
            None,
            None,
            None,
        ))
        .unwrap();

        assert_eq!(page.items.len(), 1);
        let call = &mock.calls()[0];
        assert!(call.url.ends_with("/calendars/primary/events"));
        assert!(call
            .query
            .contains(&("singleEvents".into(), "true".into())));
        assert!(call
            .query
            .contains(&("timeMin".into(), "2026-01-01T00:00:00Z".into())));
    }

    #[test]
    fn create_event_posts_body() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(json!({"id": "e2"}));
        let event = json!({"summary": "Standup"});

        tokio_test::block_on(Calendar::new(mock.clone()).create_event("primary", &event)).unwrap();

        let call = &mock.calls()[0];
        assert_eq!(call.method, "POST");
        assert_eq!(call.body.as_ref().unwrap()["summary"], "Standup");
    }
}
