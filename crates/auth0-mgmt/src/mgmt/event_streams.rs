//! The `/api/v2/event-streams` resource.
//!
//! Event streams deliver tenant events to an external destination. The
//! destination is a tagged union on its `type` field; an unrecognized
//! discriminator is a decode failure, not a silent fallback, because the
//! configuration shape is unknowable for an unknown type.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::PageFilter;
use crate::http::HttpMethod;
use crate::mgmt::{require, ClientInner, ListFetcher};
use crate::paging::PagedResult;
use crate::request::RequestBuilder;
use crate::response;
use crate::value::Maybe;

/// Lifecycle state of an event stream. Unrecognized states are preserved
/// in [`EventStreamStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventStreamStatus {
    Enabled,
    Disabled,
    Other(String),
}

impl From<String> for EventStreamStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "enabled" => EventStreamStatus::Enabled,
            "disabled" => EventStreamStatus::Disabled,
            _ => EventStreamStatus::Other(s),
        }
    }
}

impl From<EventStreamStatus> for String {
    fn from(s: EventStreamStatus) -> Self {
        match s {
            EventStreamStatus::Enabled => "enabled".to_string(),
            EventStreamStatus::Disabled => "disabled".to_string(),
            EventStreamStatus::Other(s) => s,
        }
    }
}

/// Where an event stream delivers its events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventStreamDestination {
    #[serde(rename = "webhook")]
    Webhook { configuration: WebhookConfiguration },
    #[serde(rename = "eventbridge")]
    EventBridge {
        configuration: EventBridgeConfiguration,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookConfiguration {
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub webhook_endpoint: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub webhook_authorization: Maybe<WebhookAuthorization>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookAuthorization {
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub method: Maybe<String>,
    /// Write-only; the service never echoes it back.
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub token: Maybe<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventBridgeConfiguration {
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub aws_account_id: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub aws_region: Maybe<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_partner_event_source: Option<String>,
}

/// An event type subscription of a stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub event_type: String,
}

/// An event stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventStream {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub name: Maybe<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStreamStatus>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub subscriptions: Maybe<Vec<Subscription>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<EventStreamDestination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A synthetic event submitted to a stream's test endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TestEvent {
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Client for event stream management.
pub struct EventStreamsApi {
    inner: Arc<ClientInner>,
}

impl EventStreamsApi {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List event streams. Checkpoint pagination.
    #[must_use]
    pub fn list(&self, filter: PageFilter) -> PagedResult<EventStream> {
        ListFetcher::new(
            self.inner.clone(),
            "api/v2/event-streams",
            "eventStreams",
            filter.params().to_vec(),
        )
        .into_paged()
    }

    pub async fn get(&self, stream_id: &str) -> Result<EventStream> {
        require(stream_id, "event stream id")?;
        let builder = RequestBuilder::new(HttpMethod::Get, "api/v2/event-streams/{id}")
            .path_param("id", stream_id);
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn create(&self, stream: &EventStream) -> Result<EventStream> {
        let builder =
            RequestBuilder::new(HttpMethod::Post, "api/v2/event-streams").json_body(stream)?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn update(&self, stream_id: &str, stream: &EventStream) -> Result<EventStream> {
        require(stream_id, "event stream id")?;
        let builder = RequestBuilder::new(HttpMethod::Patch, "api/v2/event-streams/{id}")
            .path_param("id", stream_id)
            .json_body(stream)?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn delete(&self, stream_id: &str) -> Result<()> {
        require(stream_id, "event stream id")?;
        let builder = RequestBuilder::new(HttpMethod::Delete, "api/v2/event-streams/{id}")
            .path_param("id", stream_id);
        let resp = self.inner.send(&builder).await?;
        response::decode_empty(&resp)
    }

    /// Submit a synthetic event to the stream and return the delivery
    /// record.
    pub async fn test(&self, stream_id: &str, event: &TestEvent) -> Result<serde_json::Value> {
        require(stream_id, "event stream id")?;
        require(&event.event_type, "event type")?;
        let builder = RequestBuilder::new(HttpMethod::Post, "api/v2/event-streams/{id}/test")
            .path_param("id", stream_id)
            .json_body(event)?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }
}
