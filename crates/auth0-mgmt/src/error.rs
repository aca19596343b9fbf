//! Error types for Management API operations.

use thiserror::Error;

use crate::http::HttpError;

/// Errors surfaced by the Management API client.
///
/// Every failure mode propagates to the immediate caller; nothing in the
/// request/decode path retries, suppresses, or substitutes defaults.
#[derive(Debug, Error)]
pub enum Auth0Error {
    /// Client construction was given an unusable base URL or credential.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// A required identifier argument was empty. Raised before any network
    /// call; never retried.
    #[error("invalid argument: {name} must not be empty")]
    InvalidArgument { name: String },

    /// A path template placeholder had no substitution.
    #[error("missing path parameter: {name}")]
    MissingPathParameter { name: String },

    /// A query parameter value cannot be rendered as a string.
    #[error("invalid query value for {name}: {reason}")]
    InvalidQueryValue { name: String, reason: String },

    /// Request or response body could not be JSON-encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The transport failed (connection refused, timeout, TLS failure).
    /// Surfaced as-is; no built-in backoff.
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    /// A 2xx body was syntactically valid JSON but did not match the
    /// expected schema. `detail` names the offending field.
    #[error("schema mismatch: {detail}")]
    SchemaMismatch { detail: String },

    /// The server returned a non-2xx response with a well-formed error
    /// envelope. The caller decides whether to retry.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// Machine-readable error code, e.g. `invalid_query_string`.
        code: Option<String>,
        /// Human-readable description of why the request failed.
        message: String,
    },

    /// The server returned a non-2xx response whose body is not a
    /// recognizable error envelope.
    #[error("malformed error response (status {status}): {body}")]
    MalformedErrorResponse { status: u16, body: String },
}

impl Auth0Error {
    /// Create a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid-argument error for the named parameter.
    #[inline]
    pub fn invalid_argument(name: impl Into<String>) -> Self {
        Self::InvalidArgument { name: name.into() }
    }

    /// Create a schema-mismatch error.
    #[inline]
    pub fn schema(detail: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            detail: detail.into(),
        }
    }

    /// HTTP status of the remote error, when this error came from a
    /// non-2xx response.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::MalformedErrorResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a remote rate-limit rejection (HTTP 429).
    #[inline]
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

/// Result type for Management API operations.
pub type Result<T> = std::result::Result<T, Auth0Error>;
