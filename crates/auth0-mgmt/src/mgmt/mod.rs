//! Management API facade.
//!
//! [`ManagementClient`] is the entry point: configure it once with the
//! tenant base URL and an access token, then reach the resource clients
//! through its accessors. All resource clients share one transport and
//! credential through an [`Arc`]'d inner state that is read-only after
//! construction.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::{Auth0Error, Result};
use crate::http::{reqwest_transport::ReqwestTransport, HttpResponse, HttpTransport};
use crate::page::Page;
use crate::paging::{PageCursor, PageFetcher, PagedResult};
use crate::request::{set_param, QueryValue, RequestBuilder};

pub mod actions;
pub mod branding_themes;
pub mod clients;
pub mod event_streams;
pub mod organizations;
pub mod users;

pub use actions::ActionsApi;
pub use branding_themes::BrandingThemesApi;
pub use clients::ClientsApi;
pub use event_streams::EventStreamsApi;
pub use organizations::OrganizationsApi;
pub use users::UsersApi;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared state behind every resource client.
pub(crate) struct ClientInner {
    base_url: Url,
    token: String,
    transport: Arc<dyn HttpTransport>,
}

impl ClientInner {
    /// Build and send one request, returning the raw response. Transport
    /// failures surface as [`Auth0Error::Transport`].
    pub(crate) async fn send(&self, builder: &RequestBuilder) -> Result<HttpResponse> {
        let request = builder.build(&self.base_url, &self.token)?;
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.send(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

/// Client for the Auth0 Management API v2.
#[derive(Clone)]
pub struct ManagementClient {
    inner: Arc<ClientInner>,
}

impl ManagementClient {
    /// Start configuring a client.
    #[must_use]
    pub fn builder() -> ManagementClientBuilder {
        ManagementClientBuilder::default()
    }

    #[must_use]
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.inner.clone())
    }

    #[must_use]
    pub fn clients(&self) -> ClientsApi {
        ClientsApi::new(self.inner.clone())
    }

    #[must_use]
    pub fn organizations(&self) -> OrganizationsApi {
        OrganizationsApi::new(self.inner.clone())
    }

    #[must_use]
    pub fn actions(&self) -> ActionsApi {
        ActionsApi::new(self.inner.clone())
    }

    #[must_use]
    pub fn event_streams(&self) -> EventStreamsApi {
        EventStreamsApi::new(self.inner.clone())
    }

    #[must_use]
    pub fn branding_themes(&self) -> BrandingThemesApi {
        BrandingThemesApi::new(self.inner.clone())
    }
}

impl std::fmt::Debug for ManagementClient {
    // Hand-written so the bearer token never reaches debug output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagementClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ManagementClient`].
#[derive(Default)]
pub struct ManagementClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl ManagementClientBuilder {
    /// Tenant base URL, e.g. `https://tenant.auth0.com`. A bare domain
    /// without a scheme is accepted and treated as https.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// API access token, sent as a bearer credential on every request.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Per-request timeout for the default transport. Ignored when a
    /// custom transport is supplied.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replace the HTTP transport, e.g. with a mock in tests.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<ManagementClient> {
        let raw = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Auth0Error::config("base URL must not be empty"))?;
        let with_scheme = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("https://{raw}")
        };
        let base_url = Url::parse(&with_scheme)
            .map_err(|err| Auth0Error::config(format!("invalid base URL `{raw}`: {err}")))?;
        if base_url.scheme() != "https" && base_url.scheme() != "http" {
            return Err(Auth0Error::config(format!(
                "base URL scheme must be http or https, got `{}`",
                base_url.scheme()
            )));
        }

        let token = self
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Auth0Error::config("access token must not be empty"))?;

        let transport = match self.transport {
            Some(t) => t,
            None => {
                let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
                Arc::new(ReqwestTransport::with_timeout(timeout)?)
            }
        };

        Ok(ManagementClient {
            inner: Arc::new(ClientInner {
                base_url,
                token,
                transport,
            }),
        })
    }
}

/// Validate a required string argument such as an identifier.
pub(crate) fn require(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Auth0Error::invalid_argument(name))
    } else {
        Ok(())
    }
}

/// A [`PageFetcher`] over one list endpoint.
///
/// The caller's filter parameters are kept as the base query; the cursor
/// applies on top of them for each page request.
pub(crate) struct ListFetcher {
    inner: Arc<ClientInner>,
    template: &'static str,
    path_params: Vec<(String, String)>,
    base_query: Vec<(String, QueryValue)>,
    items_key: &'static str,
}

impl ListFetcher {
    pub(crate) fn new(
        inner: Arc<ClientInner>,
        template: &'static str,
        items_key: &'static str,
        base_query: Vec<(String, QueryValue)>,
    ) -> Self {
        Self {
            inner,
            template,
            path_params: Vec::new(),
            base_query,
            items_key,
        }
    }

    pub(crate) fn path_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.path_params.push((name.to_string(), value.into()));
        self
    }

    /// Offset page index the caller's parameters select, 0 when absent.
    fn initial_page(&self) -> u32 {
        self.base_query
            .iter()
            .find(|(n, _)| n == "page")
            .and_then(|(_, v)| v.as_int())
            .and_then(|i| u32::try_from(i).ok())
            .unwrap_or(0)
    }

    pub(crate) fn into_paged<T>(self) -> PagedResult<T>
    where
        T: serde::de::DeserializeOwned + Send + Sync + 'static,
    {
        let initial_page = self.initial_page();
        PagedResult::new(Box::new(self), initial_page)
    }
}

#[async_trait]
impl<T> PageFetcher<T> for ListFetcher
where
    T: serde::de::DeserializeOwned + Send + Sync,
{
    async fn fetch(&self, cursor: &PageCursor) -> Result<Page<T>> {
        let mut query = self.base_query.clone();
        match cursor {
            PageCursor::Initial => {}
            PageCursor::Offset { page } => {
                set_param(&mut query, "page", QueryValue::Int(i64::from(*page)));
            }
            PageCursor::Checkpoint { from } => {
                set_param(&mut query, "from", QueryValue::Str(from.clone()));
            }
        }
        let mut builder =
            RequestBuilder::new(crate::http::HttpMethod::Get, self.template).query_params(&query);
        for (name, value) in &self.path_params {
            builder = builder.path_param(name.clone(), value.clone());
        }
        let response = self.inner.send(&builder).await?;
        Page::from_response(&response, self.items_key)
    }
}
