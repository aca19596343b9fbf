//! The `/api/v2/actions` resource.
//!
//! Actions live under a nested prefix (`/api/v2/actions/actions`) with the
//! deploy and test verbs as sub-resources of an action id.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::{ActionFilter, PageFilter};
use crate::http::HttpMethod;
use crate::mgmt::{require, ClientInner, ListFetcher};
use crate::paging::PagedResult;
use crate::request::RequestBuilder;
use crate::response;
use crate::value::Maybe;

/// Build and deployment state of an action.
///
/// Unrecognized states are preserved in [`ActionStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionStatus {
    Pending,
    Building,
    Packaged,
    Built,
    Retrying,
    Failed,
    Other(String),
}

impl From<String> for ActionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => ActionStatus::Pending,
            "building" => ActionStatus::Building,
            "packaged" => ActionStatus::Packaged,
            "built" => ActionStatus::Built,
            "retrying" => ActionStatus::Retrying,
            "failed" => ActionStatus::Failed,
            _ => ActionStatus::Other(s),
        }
    }
}

impl From<ActionStatus> for String {
    fn from(s: ActionStatus) -> Self {
        match s {
            ActionStatus::Pending => "pending".to_string(),
            ActionStatus::Building => "building".to_string(),
            ActionStatus::Packaged => "packaged".to_string(),
            ActionStatus::Built => "built".to_string(),
            ActionStatus::Retrying => "retrying".to_string(),
            ActionStatus::Failed => "failed".to_string(),
            ActionStatus::Other(s) => s,
        }
    }
}

/// A trigger binding of an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
    pub id: String,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub version: Maybe<String>,
}

/// An npm dependency of an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
}

/// A secret bound to an action. The value is write-only; the service never
/// returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionSecret {
    pub name: String,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub value: Maybe<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A serverless action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Action {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub name: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub supported_triggers: Maybe<Vec<Trigger>>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub code: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub runtime: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub dependencies: Maybe<Vec<Dependency>>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub secrets: Maybe<Vec<ActionSecret>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An immutable deployed snapshot of an action.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionVersion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub deployed: Option<bool>,
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub status: Option<ActionStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct TestBody<'a> {
    payload: &'a serde_json::Value,
}

/// Client for action management.
pub struct ActionsApi {
    inner: Arc<ClientInner>,
}

impl ActionsApi {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List actions, optionally filtered by trigger or name. Offset
    /// pagination.
    #[must_use]
    pub fn list(&self, filter: ActionFilter) -> PagedResult<Action> {
        ListFetcher::new(
            self.inner.clone(),
            "api/v2/actions/actions",
            "actions",
            filter.params().to_vec(),
        )
        .into_paged()
    }

    pub async fn get(&self, action_id: &str) -> Result<Action> {
        require(action_id, "action id")?;
        let builder = RequestBuilder::new(HttpMethod::Get, "api/v2/actions/actions/{id}")
            .path_param("id", action_id);
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn create(&self, action: &Action) -> Result<Action> {
        let builder =
            RequestBuilder::new(HttpMethod::Post, "api/v2/actions/actions").json_body(action)?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn update(&self, action_id: &str, action: &Action) -> Result<Action> {
        require(action_id, "action id")?;
        let builder = RequestBuilder::new(HttpMethod::Patch, "api/v2/actions/actions/{id}")
            .path_param("id", action_id)
            .json_body(action)?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn delete(&self, action_id: &str) -> Result<()> {
        require(action_id, "action id")?;
        let builder = RequestBuilder::new(HttpMethod::Delete, "api/v2/actions/actions/{id}")
            .path_param("id", action_id);
        let resp = self.inner.send(&builder).await?;
        response::decode_empty(&resp)
    }

    /// Deploy the current draft, creating a new immutable version.
    pub async fn deploy(&self, action_id: &str) -> Result<ActionVersion> {
        require(action_id, "action id")?;
        let builder = RequestBuilder::new(HttpMethod::Post, "api/v2/actions/actions/{id}/deploy")
            .path_param("id", action_id);
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    /// Run the draft against a test payload and return the raw execution
    /// result.
    pub async fn test(&self, action_id: &str, payload: &serde_json::Value) -> Result<serde_json::Value> {
        require(action_id, "action id")?;
        let builder = RequestBuilder::new(HttpMethod::Post, "api/v2/actions/actions/{id}/test")
            .path_param("id", action_id)
            .json_body(&TestBody { payload })?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    /// List the deployed versions of an action. Offset pagination.
    pub fn list_versions(
        &self,
        action_id: &str,
        filter: PageFilter,
    ) -> Result<PagedResult<ActionVersion>> {
        require(action_id, "action id")?;
        Ok(ListFetcher::new(
            self.inner.clone(),
            "api/v2/actions/actions/{id}/versions",
            "versions",
            filter.params().to_vec(),
        )
        .path_param("id", action_id)
        .into_paged())
    }
}
