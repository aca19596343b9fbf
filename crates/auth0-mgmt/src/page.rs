//! Decoded list pages.
//!
//! List endpoints respond in one of two shapes. Without
//! `include_totals=true` the body is a bare JSON array of items. With it,
//! the body is an envelope object carrying the items under a
//! resource-specific key ("users", "clients", ...) next to the query
//! summary fields `start`, `limit`, `length` and `total`. Checkpoint
//! endpoints use the same envelope with a `next` cursor instead of the
//! summary.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Auth0Error, Result};
use crate::http::HttpResponse;
use crate::response;

/// One decoded page of a list response.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based index of the first item, offset style only.
    pub start: Option<u64>,
    /// Page size the server applied, offset style only.
    pub limit: Option<u64>,
    /// Number of items in this page, offset style only.
    pub length: Option<u64>,
    /// Total matching items across all pages, offset style only.
    pub total: Option<u64>,
    /// Checkpoint cursor for the next page. `Some("")` means the server
    /// reported the end of the result set.
    pub next: Option<String>,
    /// Whether the body was an envelope object rather than a bare array.
    pub envelope: bool,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a list response body. Non-2xx responses are turned into API
    /// errors first.
    pub fn from_response(resp: &HttpResponse, items_key: &str) -> Result<Self> {
        if !resp.is_success() {
            return Err(response::error_from_response(resp));
        }
        let value: Value = serde_json::from_slice(&resp.body)
            .map_err(|err| Auth0Error::schema(format!("list response is not JSON: {err}")))?;
        Self::from_value(value, items_key)
    }

    /// Decode a list body that is either a bare array or an envelope with
    /// `items_key` holding the array.
    pub fn from_value(value: Value, items_key: &str) -> Result<Self> {
        match value {
            Value::Array(raw) => {
                let items = decode_items(raw)?;
                Ok(Page {
                    items,
                    start: None,
                    limit: None,
                    length: None,
                    total: None,
                    next: None,
                    envelope: false,
                })
            }
            Value::Object(mut map) => {
                let raw = match map.remove(items_key) {
                    Some(Value::Array(raw)) => raw,
                    Some(other) => {
                        return Err(Auth0Error::schema(format!(
                            "field `{items_key}` holds {} instead of an array",
                            type_name(&other)
                        )))
                    }
                    None => {
                        return Err(Auth0Error::schema(format!(
                            "list envelope is missing the `{items_key}` array"
                        )))
                    }
                };
                let next = match map.get("next") {
                    Some(Value::String(s)) => Some(s.clone()),
                    Some(Value::Null) => Some(String::new()),
                    _ => None,
                };
                Ok(Page {
                    items: decode_items(raw)?,
                    start: meta_u64(&map, "start"),
                    limit: meta_u64(&map, "limit"),
                    length: meta_u64(&map, "length"),
                    total: meta_u64(&map, "total"),
                    next,
                    envelope: true,
                })
            }
            other => Err(Auth0Error::schema(format!(
                "list response is {} instead of an array or object",
                type_name(&other)
            ))),
        }
    }
}

fn decode_items<T: DeserializeOwned>(raw: Vec<Value>) -> Result<Vec<T>> {
    raw.into_iter()
        .map(|v| {
            serde_json::from_value(v)
                .map_err(|err| Auth0Error::schema(format!("list item: {err}")))
        })
        .collect()
}

/// Read a numeric summary field leniently. Servers have been observed to
/// send these as floats; non-integral values are truncated toward zero and
/// negative or non-numeric values are treated as absent.
fn meta_u64(map: &serde_json::Map<String, Value>, key: &str) -> Option<u64> {
    match map.get(key)? {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Some(u)
            } else {
                n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)
            }
        }
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
