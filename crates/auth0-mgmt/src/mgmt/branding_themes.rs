//! The `/api/v2/branding/themes` resource.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http::HttpMethod;
use crate::mgmt::{require, ClientInner};
use crate::request::RequestBuilder;
use crate::response;
use crate::value::Maybe;

/// A Universal Login theme.
///
/// The section payloads (`borders`, `colors`, `fonts`, `page_background`,
/// `widget`) are deep setting objects the service validates; they are kept
/// as raw JSON rather than mirrored field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandingTheme {
    #[serde(default, rename = "themeId", skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
    #[serde(default, rename = "displayName", skip_serializing_if = "Maybe::is_absent")]
    pub display_name: Maybe<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borders: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_background: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<serde_json::Value>,
}

/// Client for branding theme management.
pub struct BrandingThemesApi {
    inner: Arc<ClientInner>,
}

impl BrandingThemesApi {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Fetch the theme currently applied to the tenant.
    pub async fn default_theme(&self) -> Result<BrandingTheme> {
        let builder = RequestBuilder::new(HttpMethod::Get, "api/v2/branding/themes/default");
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn get(&self, theme_id: &str) -> Result<BrandingTheme> {
        require(theme_id, "theme id")?;
        let builder = RequestBuilder::new(HttpMethod::Get, "api/v2/branding/themes/{themeId}")
            .path_param("themeId", theme_id);
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn create(&self, theme: &BrandingTheme) -> Result<BrandingTheme> {
        let builder =
            RequestBuilder::new(HttpMethod::Post, "api/v2/branding/themes").json_body(theme)?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn update(&self, theme_id: &str, theme: &BrandingTheme) -> Result<BrandingTheme> {
        require(theme_id, "theme id")?;
        let builder = RequestBuilder::new(HttpMethod::Patch, "api/v2/branding/themes/{themeId}")
            .path_param("themeId", theme_id)
            .json_body(theme)?;
        let resp = self.inner.send(&builder).await?;
        response::decode_json(&resp)
    }

    pub async fn delete(&self, theme_id: &str) -> Result<()> {
        require(theme_id, "theme id")?;
        let builder = RequestBuilder::new(HttpMethod::Delete, "api/v2/branding/themes/{themeId}")
            .path_param("themeId", theme_id);
        let resp = self.inner.send(&builder).await?;
        response::decode_empty(&resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    async fn test_default_theme_hits_the_default_route() {
        let transport = MockTransport::new();
        transport.push_json(
            HttpMethod::Get,
            "https://tenant.auth0.com/api/v2/branding/themes/default",
            json!({"themeId": "thm_1", "displayName": "Corporate"}),
        );
        let theme = client(&transport).branding_themes().default_theme().await.unwrap();
        assert_eq!(theme.theme_id.as_deref(), Some("thm_1"));
        assert_eq!(theme.display_name.as_ref().map(String::as_str), Some("Corporate"));
    }

    #[tokio::test]
    async fn test_update_keeps_wire_field_names() {
        let transport = MockTransport::new();
        transport.push_json(
            HttpMethod::Patch,
            "https://tenant.auth0.com/api/v2/branding/themes/thm_1",
            json!({"themeId": "thm_1", "displayName": "Dark"}),
        );
        let patch = BrandingTheme {
            display_name: Maybe::Value("Dark".to_string()),
            colors: Some(json!({"primary_button": "#101010"})),
            ..BrandingTheme::default()
        };
        client(&transport).branding_themes().update("thm_1", &patch).await.unwrap();

        let body: serde_json::Value =
            serde_json::from_slice(&transport.requests()[0].body).unwrap();
        assert_eq!(
            body,
            json!({"displayName": "Dark", "colors": {"primary_button": "#101010"}})
        );
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let transport = MockTransport::new();
        transport.push_response(
            HttpMethod::Delete,
            "https://tenant.auth0.com/api/v2/branding/themes/thm_1",
            HttpResponse {
                status: 204,
                headers: Vec::new(),
                body: Vec::new(),
            },
        );
        client(&transport).branding_themes().delete("thm_1").await.unwrap();
    }
}
