//! workspace::groups
//!
//! Admin SDK Directory API client for group membership.
//!
//! Requires a token with directory scopes; ordinary user tokens get
//! `PermissionDenied` back from the API.

use std::sync::Arc;

use serde_json::{json, Value};

use super::common::page_from;
use super::transport::{ApiError, Transport};
use crate::engine::paginate::Page;

const DIRECTORY_API_BASE: &str = "https://admin.googleapis.com/admin/directory/v1";

pub struct Groups {
    transport: Arc<dyn Transport>,
}

super::service_wrapper!(Groups);

impl Groups {
    /// List groups, scoped to a member's email when given.
    pub async fn list_groups(
        &self,
        member: Option<&str>,
        max: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<Page<Value>, ApiError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        match member {
            Some(email) => params.push(("userKey", email.to_string())),
            None => params.push(("customer", "my_customer".to_string())),
        }
        if let Some(max) = max {
            params.push(("maxResults", max.to_string()));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        let url = format!("{}/groups", DIRECTORY_API_BASE);
        let response = self.transport.get(&url, &params).await?;
        Ok(page_from(&response, "groups"))
    }

    /// List members of a group.
    pub async fn list_members(
        &self,
        group_key: &str,
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
        let url = format!("{}/groups/{}/members", DIRECTORY_API_BASE, group_key);
        let response = self.transport.get(&url, &params).await?;
        Ok(page_from(&response, "members"))
    }

    /// Add a member to a group.
    pub async fn insert_member(
        &self,
        group_key: &str,
        email: &str,
        role: &str,
    ) -> Result<Value, ApiError> {
        let url = format!("{}/groups/{}/members", DIRECTORY_API_BASE, group_key);
        let body = json!({ "email": email, "role": role });
        self.transport.post(&url, &body).await
    }

    /// Remove a member from a group.
    pub async fn delete_member(&self, group_key: &str, member_key: &str) -> Result<(), ApiError> {
        let url = format!(
            "{}/groups/{}/members/{}",
            DIRECTORY_API_BASE, group_key, member_key
        );
        self.transport.delete(&url).await?;
        Ok(())
    }
}
