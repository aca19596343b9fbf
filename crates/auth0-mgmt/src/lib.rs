//! auth0-mgmt - An async client for the Auth0 Management API v2.
//!
//! This library wraps the tenant management endpoints (users, applications,
//! organizations, actions, event streams, branding themes) behind typed
//! resource clients that share one HTTP transport and credential.
//!
//! # Example
//!
//! ```ignore
//! use auth0_mgmt::{ManagementClient, QueryFilter};
//!
//! let client = ManagementClient::builder()
//!     .base_url("https://tenant.auth0.com")
//!     .token(api_token)
//!     .build()?;
//!
//! // Search users, walking pages lazily.
//! let filter = QueryFilter::new()
//!     .with_query("email_verified:false")
//!     .with_page(0, 50)
//!     .with_totals(true);
//! let mut result = client.users().list(filter);
//! while result.has_more() {
//!     for user in result.fetch_next().await? {
//!         println!("{:?}", user.email);
//!     }
//! }
//! ```

pub mod error;
pub mod filter;
pub mod http;
pub mod mgmt;
pub mod page;
pub mod paging;
pub mod request;
pub mod response;
pub mod value;

pub use error::{Auth0Error, Result};
pub use filter::{ActionFilter, FieldsFilter, PageFilter, QueryFilter};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use mgmt::{
    ActionsApi, BrandingThemesApi, ClientsApi, EventStreamsApi, ManagementClient,
    ManagementClientBuilder, OrganizationsApi, UsersApi,
};
pub use page::Page;
pub use paging::{PageCursor, PageFetcher, PagedResult};
pub use request::{QueryValue, RequestBuilder};
pub use value::Maybe;
