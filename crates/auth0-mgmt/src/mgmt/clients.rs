//! The `/api/v2/clients` resource (applications).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::QueryFilter;
use crate::http::HttpMethod;
use crate::mgmt::{require, ClientInner, ListFetcher};
use crate::paging::PagedResult;
use crate::request::RequestBuilder;
use crate::response;
use crate::value::Maybe;

/// Application type of a client.
///
/// The service adds new types over time; unrecognized values are preserved
/// verbatim in [`AppType::Other`] so a round trip never loses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppType {
    Native,
    Spa,
    RegularWeb,
    NonInteractive,
    Other(String),
}

impl From<String> for AppType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "native" => AppType::Native,
            "spa" => AppType::Spa,
            "regular_web" => AppType::RegularWeb,
            "non_interactive" => AppType::NonInteractive,
            _ => AppType::Other(s),
        }
    }
}

impl From<AppType> for String {
    fn from(t: AppType) -> Self {
        match t {
            AppType::Native => "native".to_string(),
            AppType::Spa => "spa".to_string(),
            AppType::RegularWeb => "regular_web".to_string(),
            AppType::NonInteractive => "non_interactive".to_string(),
            AppType::Other(s) => s,
        }
    }
}

/// JWT signing configuration of a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JwtConfiguration {
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub lifetime_in_seconds: Maybe<u64>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub alg: Maybe<String>,
}

/// A registered application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub name: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub description: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub app_type: Maybe<AppType>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub callbacks: Maybe<Vec<String>>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub allowed_origins: Maybe<Vec<String>>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub grant_types: Maybe<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub jwt_configuration: Maybe<JwtConfiguration>,
    #[serde(default, skip_serializing_if = "Maybe::is_absent")]
    pub oidc_conformant: Maybe<bool>,
}

/// Client for application management.
pub struct ClientsApi {
    inner: Arc<ClientInner>,
}

impl ClientsApi {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List applications. Offset pagination.
    #[must_use]
    pub fn list(&self, filter: QueryFilter) -> PagedResult<Client> {
        ListFetcher::new(
            self.inner.clone(),
            "api/v2/clients",
            "clients",
            filter.params().to_vec(),
        )
        .into_paged()
    }

    pub async fn get(&self, client_id: &str) -> Result<Client> {
        require(client_id, "client id")?;
        let builder = RequestBuilder::new(HttpMethod::Get, "api/v2/clients/{id}")
            .path_param("id", client_id);
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn create(&self, client: &Client) -> Result<Client> {
        let builder = RequestBuilder::new(HttpMethod::Post, "api/v2/clients").json_body(client)?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn update(&self, client_id: &str, client: &Client) -> Result<Client> {
        require(client_id, "client id")?;
        let builder = RequestBuilder::new(HttpMethod::Patch, "api/v2/clients/{id}")
            .path_param("id", client_id)
            .json_body(client)?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn delete(&self, client_id: &str) -> Result<()> {
        require(client_id, "client id")?;
        let builder = RequestBuilder::new(HttpMethod::Delete, "api/v2/clients/{id}")
            .path_param("id", client_id);
        let resp = self.inner.send(&builder).await?;
        response::decode_empty(&resp)
    }

    /// Rotate the client secret. The response carries the new secret.
    pub async fn rotate_secret(&self, client_id: &str) -> Result<Client> {
        require(client_id, "client id")?;
        let builder = RequestBuilder::new(HttpMethod::Post, "api/v2/clients/{id}/rotate-secret")
            .path_param("id", client_id);
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Auth0Error;
    use crate::http::MockTransport;
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

    #[test]
    fn test_app_type_preserves_unknown_values() {
        let decoded: AppType = serde_json::from_value(json!("sso_integration")).unwrap();
        assert_eq!(decoded, AppType::Other("sso_integration".to_string()));
        assert_eq!(
            serde_json::to_value(&decoded).unwrap(),
            json!("sso_integration")
        );

        let known: AppType = serde_json::from_value(json!("regular_web")).unwrap();
        assert_eq!(known, AppType::RegularWeb);
    }

    #[tokio::test]
    async fn test_rotate_secret_posts_without_body() {
        let transport = MockTransport::new();
        transport.push_json(
            HttpMethod::Post,
            "https://tenant.auth0.com/api/v2/clients/cli_1/rotate-secret",
            json!({"client_id": "cli_1", "client_secret": "fresh"}),
        );
        let rotated = client(&transport).clients().rotate_secret("cli_1").await.unwrap();
        assert_eq!(rotated.client_secret.as_deref(), Some("fresh"));

        let requests = transport.requests();
        assert!(requests[0].body.is_empty());
        assert_eq!(requests[0].header("Content-Type"), None);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_id() {
        let transport = MockTransport::new();
        let err = client(&transport)
            .clients()
            .update(" ", &Client::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Auth0Error::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_get_decodes_nested_configuration() {
        let transport = MockTransport::new();
        transport.push_json(
            HttpMethod::Get,
            "https://tenant.auth0.com/api/v2/clients/cli_1",
            json!({
                "client_id": "cli_1",
                "name": "Dashboard",
                "app_type": "spa",
                "callbacks": ["https://app.acme.test/callback"],
                "jwt_configuration": {"lifetime_in_seconds": 36000, "alg": "RS256"},
            }),
        );
        let fetched = client(&transport).clients().get("cli_1").await.unwrap();
        assert_eq!(fetched.app_type.as_ref(), Some(&AppType::Spa));
        let jwt = fetched.jwt_configuration.as_ref().unwrap();
        assert_eq!(jwt.lifetime_in_seconds.as_ref(), Some(&36000));
        assert_eq!(jwt.alg.as_ref().map(String::as_str), Some("RS256"));
    }

    #[tokio::test]
    async fn test_list_bare_array_stops_on_empty_page() {
        let transport = MockTransport::new();
        transport.push_json(
            HttpMethod::Get,
            "https://tenant.auth0.com/api/v2/clients",
            json!([{"client_id": "cli_1"}]),
        );
        transport.push_json(
            HttpMethod::Get,
            "https://tenant.auth0.com/api/v2/clients?page=1",
            json!([]),
        );
        let mut result = client(&transport).clients().list(QueryFilter::new());
        assert_eq!(result.fetch_next().await.unwrap().len(), 1);
        assert!(result.fetch_next().await.unwrap().is_empty());
        assert!(result.is_exhausted());
    }
}
