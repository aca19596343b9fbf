//! Request construction: logical operation descriptor to transport-ready
//! HTTP request.
//!
//! Building a request is a pure transformation; no I/O happens here. Path
//! placeholders and query values are percent-encoded exactly once, by the
//! URL builder.

use serde::Serialize;
use url::Url;

use crate::error::{Auth0Error, Result};
use crate::http::{HttpMethod, HttpRequest};

const USER_AGENT: &str = concat!("auth0-mgmt/", env!("CARGO_PKG_VERSION"));

/// A typed query-parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Float(f64),
}

impl QueryValue {
    /// Render the value for the query string.
    ///
    /// Fails with `InvalidQueryValue` for values that have no stable string
    /// form (non-finite floats).
    pub fn render(&self, name: &str) -> Result<String> {
        match self {
            QueryValue::Str(s) => Ok(s.clone()),
            QueryValue::Int(i) => Ok(i.to_string()),
            QueryValue::Bool(b) => Ok(b.to_string()),
            QueryValue::Float(f) => {
                if f.is_finite() {
                    Ok(f.to_string())
                } else {
                    Err(Auth0Error::InvalidQueryValue {
                        name: name.to_string(),
                        reason: "float value is not finite".to_string(),
                    })
                }
            }
        }
    }

    /// The integer value, when this is an `Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            QueryValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue::Str(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue::Str(v)
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        QueryValue::Int(v)
    }
}

impl From<u32> for QueryValue {
    fn from(v: u32) -> Self {
        QueryValue::Int(i64::from(v))
    }
}

impl From<bool> for QueryValue {
    fn from(v: bool) -> Self {
        QueryValue::Bool(v)
    }
}

impl From<f64> for QueryValue {
    fn from(v: f64) -> Self {
        QueryValue::Float(v)
    }
}

/// Set a query parameter, replacing any existing value for the same name.
///
/// Order is preserved: a replaced parameter keeps its original position and
/// a new one is appended.
pub(crate) fn set_param(params: &mut Vec<(String, QueryValue)>, name: &str, value: QueryValue) {
    if let Some(slot) = params.iter_mut().find(|(n, _)| n == name) {
        slot.1 = value;
    } else {
        params.push((name.to_string(), value));
    }
}

/// Builder for one logical API operation.
///
/// The path template uses `{name}` placeholders; every placeholder must be
/// supplied via [`RequestBuilder::path_param`] or building fails with
/// `MissingPathParameter`. Omitted query parameters are never serialized.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: HttpMethod,
    template: String,
    path_params: Vec<(String, String)>,
    query: Vec<(String, QueryValue)>,
    body: Option<serde_json::Value>,
}

impl RequestBuilder {
    pub fn new(method: HttpMethod, template: impl Into<String>) -> Self {
        Self {
            method,
            template: template.into(),
            path_params: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Supply a value for a `{name}` placeholder in the path template.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push((name.into(), value.into()));
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append all parameters from a filter, in the filter's order.
    #[must_use]
    pub fn query_params(mut self, params: &[(String, QueryValue)]) -> Self {
        for (name, value) in params {
            self.query.push((name.clone(), value.clone()));
        }
        self
    }

    /// Attach a JSON body.
    pub fn json_body<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub(crate) fn method(&self) -> HttpMethod {
        self.method
    }

    /// Produce the transport-ready request: fully qualified URL, bearer
    /// authorization, JSON content type when a body is present.
    pub fn build(&self, base_url: &Url, token: &str) -> Result<HttpRequest> {
        let mut url = base_url.clone();

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Auth0Error::config("base URL cannot be a base for paths"))?;
            segments.pop_if_empty();
            for segment in self.template.split('/') {
                if let Some(name) = placeholder_name(segment) {
                    let value = self
                        .path_params
                        .iter()
                        .find(|(n, _)| n == name)
                        .map(|(_, v)| v.as_str())
                        .ok_or_else(|| Auth0Error::MissingPathParameter {
                            name: name.to_string(),
                        })?;
                    segments.push(value);
                } else {
                    segments.push(segment);
                }
            }
        }

        let mut rendered = Vec::with_capacity(self.query.len());
        for (name, value) in &self.query {
            rendered.push((name.as_str(), value.render(name)?));
        }
        if !rendered.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &rendered {
                pairs.append_pair(name, value);
            }
        }

        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
            ("Authorization".to_string(), format!("Bearer {token}")),
        ];

        let body = match &self.body {
            Some(value) => {
                headers.push((
                    "Content-Type".to_string(),
                    "application/json".to_string(),
                ));
                serde_json::to_vec(value)?
            }
            None => Vec::new(),
        };

        Ok(HttpRequest {
            method: self.method,
            url: url.to_string(),
            headers,
            body,
        })
    }
}

fn placeholder_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{').and_then(|s| s.strip_suffix('}'))
}
