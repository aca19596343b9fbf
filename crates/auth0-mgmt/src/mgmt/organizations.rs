//! The `/api/v2/organizations` resource.
//!
//! Organizations support both pagination styles: offset with
//! `page`/`per_page` and checkpoint with `from`/`take`. Member listing is
//! checkpoint-only.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Auth0Error, Result};
use crate::filter::PageFilter;
use crate::http::HttpMethod;
use crate::mgmt::{require, ClientInner, ListFetcher};
use crate::paging::PagedResult;
use crate::request::RequestBuilder;
use crate::response;
use crate::value::Maybe;

/// An organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub name: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub display_name: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub branding: Maybe<OrganizationBranding>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub metadata: Maybe<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationBranding {
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub logo_url: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub colors: Maybe<BrandingColors>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandingColors {
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub primary: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub page_background: Maybe<String>,
}

/// A user's membership in an organization.
#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Serialize)]
struct MembersBody<'a> {
    members: &'a [String],
}

/// Client for organization management.
pub struct OrganizationsApi {
    inner: Arc<ClientInner>,
}

impl OrganizationsApi {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List organizations. The filter chooses the pagination style; when a
    /// `from` cursor is set the service ignores offset parameters.
    #[must_use]
    pub fn list(&self, filter: PageFilter) -> PagedResult<Organization> {
        ListFetcher::new(
            self.inner.clone(),
            "api/v2/organizations",
            "organizations",
            filter.params().to_vec(),
        )
        .into_paged()
    }

    pub async fn get(&self, org_id: &str) -> Result<Organization> {
        require(org_id, "organization id")?;
        let builder = RequestBuilder::new(HttpMethod::Get, "api/v2/organizations/{id}")
            .path_param("id", org_id);
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    /// Fetch an organization by its unique name.
    pub async fn get_by_name(&self, name: &str) -> Result<Organization> {
        require(name, "organization name")?;
        let builder = RequestBuilder::new(HttpMethod::Get, "api/v2/organizations/name/{name}")
            .path_param("name", name);
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn create(&self, organization: &Organization) -> Result<Organization> {
        let builder =
            RequestBuilder::new(HttpMethod::Post, "api/v2/organizations").json_body(organization)?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn update(&self, org_id: &str, organization: &Organization) -> Result<Organization> {
        require(org_id, "organization id")?;
        let builder = RequestBuilder::new(HttpMethod::Patch, "api/v2/organizations/{id}")
            .path_param("id", org_id)
            .json_body(organization)?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn delete(&self, org_id: &str) -> Result<()> {
        require(org_id, "organization id")?;
        let builder = RequestBuilder::new(HttpMethod::Delete, "api/v2/organizations/{id}")
            .path_param("id", org_id);
        let resp = self.inner.send(&builder).await?;
        response::decode_empty(&resp)
    }

    /// List the members of an organization. Checkpoint pagination.
    pub fn list_members(&self, org_id: &str, filter: PageFilter) -> Result<PagedResult<Member>> {
        require(org_id, "organization id")?;
        Ok(ListFetcher::new(
            self.inner.clone(),
            "api/v2/organizations/{id}/members",
            "members",
            filter.params().to_vec(),
        )
        .path_param("id", org_id)
        .into_paged())
    }

    /// Add users to an organization by user id.
    pub async fn add_members(&self, org_id: &str, user_ids: &[String]) -> Result<()> {
        require(org_id, "organization id")?;
        if user_ids.is_empty() {
            return Err(Auth0Error::invalid_argument("members"));
        }
        let builder = RequestBuilder::new(HttpMethod::Post, "api/v2/organizations/{id}/members")
            .path_param("id", org_id)
            .json_body(&MembersBody { members: user_ids })?;
        let resp = self.inner.send(&builder).await?;
        response::decode_empty(&resp)
    }

    /// Remove users from an organization by user id.
    pub async fn delete_members(&self, org_id: &str, user_ids: &[String]) -> Result<()> {
        require(org_id, "organization id")?;
        if user_ids.is_empty() {
            return Err(Auth0Error::invalid_argument("members"));
        }
        let builder = RequestBuilder::new(HttpMethod::Delete, "api/v2/organizations/{id}/members")
            .path_param("id", org_id)
            .json_body(&MembersBody { members: user_ids })?;
        let resp = self.inner.send(&builder).await?;
        response::decode_empty(&resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Auth0Error;
    use crate::http::{HttpResponse, MockTransport};
    use crate::mgmt::ManagementClient;
    use serde_json::json;

    fn client(transport: &MockTransport) -> ManagementClient {
        ManagementClient::builder()
            .base_url("https://tenant.auth0.com")
            .token("tkn")
            .transport(Arc::new(transport.clone()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_by_name_hits_the_name_route() {
        let transport = MockTransport::new();
        transport.push_json(
            HttpMethod::Get,
            "https://tenant.auth0.com/api/v2/organizations/name/acme",
            json!({"id": "org_1", "name": "acme", "display_name": "Acme Inc."}),
        );
        let org = client(&transport).organizations().get_by_name("acme").await.unwrap();
        assert_eq!(org.id.as_deref(), Some("org_1"));
        assert_eq!(org.display_name.as_ref().map(String::as_str), Some("Acme Inc."));
    }

    #[tokio::test]
    async fn test_list_members_walks_checkpoint_pages() {
        let transport = MockTransport::new();
        transport.push_json(
            HttpMethod::Get,
            "https://tenant.auth0.com/api/v2/organizations/org_1/members?take=2",
            json!({"members": [{"user_id": "u1"}, {"user_id": "u2"}], "next": "tok"}),
        );
        transport.push_json(
            HttpMethod::Get,
            "https://tenant.auth0.com/api/v2/organizations/org_1/members?take=2&from=tok",
            json!({"members": [{"user_id": "u3"}], "next": ""}),
        );
        let mut result = client(&transport)
            .organizations()
            .list_members("org_1", PageFilter::new().with_take(2))
            .unwrap();

        assert_eq!(result.fetch_next().await.unwrap().len(), 2);
        assert_eq!(result.fetch_next().await.unwrap().len(), 1);
        assert!(result.is_exhausted());
        assert!(result.fetch_next().await.unwrap().is_empty());
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_add_members_posts_the_member_list() {
        let transport = MockTransport::new();
        transport.push_response(
            HttpMethod::Post,
            "https://tenant.auth0.com/api/v2/organizations/org_1/members",
            HttpResponse {
                status: 204,
                headers: Vec::new(),
                body: Vec::new(),
            },
        );
        client(&transport)
            .organizations()
            .add_members("org_1", &["u1".to_string(), "u2".to_string()])
            .await
            .unwrap();

        let body: serde_json::Value =
            serde_json::from_slice(&transport.requests()[0].body).unwrap();
        assert_eq!(body, json!({"members": ["u1", "u2"]}));
    }

    #[tokio::test]
    async fn test_member_mutations_reject_empty_lists() {
        let transport = MockTransport::new();
        let api = client(&transport).organizations();
        let err = api.add_members("org_1", &[]).await.unwrap_err();
        assert!(matches!(err, Auth0Error::InvalidArgument { .. }));
        let err = api.delete_members("org_1", &[]).await.unwrap_err();
        assert!(matches!(err, Auth0Error::InvalidArgument { .. }));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_branding_round_trip_keeps_nested_null() {
        let decoded: Organization = serde_json::from_value(json!({
            "id": "org_1",
            "branding": {"logo_url": null, "colors": {"primary": "#ff0000"}},
        }))
        .unwrap();
        let branding = decoded.branding.as_ref().unwrap();
        assert!(branding.logo_url.is_null());

        let encoded = serde_json::to_value(&decoded).unwrap();
        assert_eq!(
            encoded,
            json!({
                "id": "org_1",
                "branding": {"logo_url": null, "colors": {"primary": "#ff0000"}},
            })
        );
    }
}
