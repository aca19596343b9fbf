//! The `/api/v2/users` resource.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::{FieldsFilter, QueryFilter};
use crate::http::HttpMethod;
use crate::mgmt::{require, ClientInner, ListFetcher};
use crate::paging::PagedResult;
use crate::request::RequestBuilder;
use crate::response;
use crate::value::Maybe;

/// A user profile.
///
/// Writable fields are tri-state: leaving one [`Maybe::Absent`] keeps it out
/// of the payload, while [`Maybe::Null`] sends an explicit `null` to clear
/// the stored value. Server-managed fields are plain `Option`s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub email: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub email_verified: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub username: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub phone_number: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub name: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub nickname: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub given_name: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub family_name: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub picture: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub blocked: Maybe<bool>,
    /// Connection the user is created in. Write-only.
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub connection: Maybe<String>,
    /// Initial or replacement password. Write-only.
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub password: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub user_metadata: Maybe<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub app_metadata: Maybe<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identities: Option<Vec<Identity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logins_count: Option<u64>,
}

/// One linked identity of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_social: Option<bool>,
}

/// Client for user management.
pub struct UsersApi {
    inner: Arc<ClientInner>,
}

impl UsersApi {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List or search users. Offset pagination; pass
    /// [`QueryFilter::with_totals`] to get a total count on the result.
    #[must_use]
    pub fn list(&self, filter: QueryFilter) -> PagedResult<User> {
        ListFetcher::new(
            self.inner.clone(),
            "api/v2/users",
            "users",
            filter.params().to_vec(),
        )
        .into_paged()
    }

    /// Fetch a user by id.
    pub async fn get(&self, user_id: &str, fields: Option<FieldsFilter>) -> Result<User> {
        require(user_id, "user id")?;
        let mut builder =
            RequestBuilder::new(HttpMethod::Get, "api/v2/users/{id}").path_param("id", user_id);
        if let Some(fields) = fields {
            builder = builder.query_params(fields.params());
        }
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    /// Create a user. `connection` is required by the service.
    pub async fn create(&self, user: &User) -> Result<User> {
        let builder = RequestBuilder::new(HttpMethod::Post, "api/v2/users").json_body(user)?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    /// Update a user. Only the fields present in `user` are touched; a
    /// [`Maybe::Null`] field is cleared on the server.
    pub async fn update(&self, user_id: &str, user: &User) -> Result<User> {
        require(user_id, "user id")?;
        let builder = RequestBuilder::new(HttpMethod::Patch, "api/v2/users/{id}")
            .path_param("id", user_id)
            .json_body(user)?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    /// Delete a user.
    pub async fn delete(&self, user_id: &str) -> Result<()> {
        require(user_id, "user id")?;
        let builder =
            RequestBuilder::new(HttpMethod::Delete, "api/v2/users/{id}").path_param("id", user_id);
        let resp = self.inner.send(&builder).await?;
        response::decode_empty(&resp)
    }
}
