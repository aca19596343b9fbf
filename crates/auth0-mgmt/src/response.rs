//! Response decoding: raw HTTP response to typed value or structured error.

use serde::de::DeserializeOwned;

use crate::error::{Auth0Error, Result};
use crate::http::HttpResponse;

/// Message fields of the error envelope, in priority order.
const MESSAGE_KEYS: [&str; 3] = ["error_description", "description", "message"];
/// Code fields of the error envelope, in priority order.
const CODE_KEYS: [&str; 3] = ["error", "errorCode", "code"];

/// Decode a 2xx response body into `T`.
///
/// A body that is valid JSON but structurally mismatched fails with
/// `SchemaMismatch`; serde's detail names the offending field.
pub fn decode_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    ensure_success(response)?;
    if response.body.is_empty() {
        return Err(Auth0Error::schema("empty body where JSON was expected"));
    }
    serde_json::from_slice(&response.body).map_err(|e| Auth0Error::schema(e.to_string()))
}

/// Decode a 2xx response that carries no meaningful body (e.g. DELETE).
///
/// Zero-length bodies are never passed to the JSON parser; a non-empty body
/// on success is ignored.
pub fn decode_empty(response: &HttpResponse) -> Result<()> {
    ensure_success(response)
}

fn ensure_success(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(error_from_response(response))
    }
}

/// Interpret a non-2xx response as the Auth0 error envelope.
///
/// The envelope's exact field names vary by resource; the message is taken
/// from the first of `error_description`/`description`/`message`, the code
/// from the first of `error`/`errorCode`/`code`. A body that is not a JSON
/// object carrying at least one of those keys becomes
/// [`Auth0Error::MalformedErrorResponse`].
pub fn error_from_response(response: &HttpResponse) -> Auth0Error {
    let malformed = || Auth0Error::MalformedErrorResponse {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).to_string(),
    };

    let value: serde_json::Value = match serde_json::from_slice(&response.body) {
        Ok(v) => v,
        Err(_) => return malformed(),
    };
    let map = match value.as_object() {
        Some(m) => m,
        None => return malformed(),
    };

    let message = MESSAGE_KEYS
        .iter()
        .find_map(|k| map.get(*k).and_then(|v| v.as_str()))
        .map(str::to_string);
    let code = CODE_KEYS
        .iter()
        .find_map(|k| map.get(*k).and_then(|v| v.as_str()))
        .map(str::to_string);

    match (message, &code) {
        (None, None) => malformed(),
        (message, _) => Auth0Error::Api {
            status: response.status,
            message: message.or_else(|| code.clone()).unwrap_or_default(),
            code,
        },
    }
}

/// Structural JSON equality with floating-point tolerance.
///
/// The service occasionally emits integer-typed fields as floating literals,
/// so comparisons treat numbers as equal within `1e-10` rather than
/// requiring bit-identical representations. Object key order is ignored;
/// array order is significant.
#[must_use]
pub fn json_eq(a: &serde_json::Value, b: &serde_json::Value) -> bool {
    use serde_json::Value;

    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => (x - y).abs() < 1e-10,
            _ => x == y,
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| json_eq(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, v)| y.get(k).is_some_and(|w| json_eq(v, w)))
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn response(status: u16, body: impl AsRef<[u8]>) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.as_ref().to_vec(),
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: String,
    }

    #[test]
    fn test_decodes_success_body() {
        let thing: Thing = decode_json(&response(200, r#"{"id":"t1"}"#)).expect("decode");
        assert_eq!(thing.id, "t1");
    }

    #[test]
    fn test_structural_mismatch_names_offending_field() {
        let err = decode_json::<Thing>(&response(200, r#"{"name":"t1"}"#))
            .expect_err("missing field should fail");
        match err {
            Auth0Error::SchemaMismatch { detail } => {
                assert!(detail.contains("id"), "detail should name the field: {detail}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_success_body_is_unit_not_parse_error() {
        decode_empty(&response(204, "")).expect("empty delete response");
        // decode_json on an empty body is a schema error, not a panic.
        let err = decode_json::<Thing>(&response(200, "")).expect_err("empty body");
        assert!(matches!(err, Auth0Error::SchemaMismatch { .. }));
    }

    #[test]
    fn test_all_optional_target_accepts_empty_object() {
        #[derive(Debug, Default, Deserialize)]
        struct Empty {
            #[serde(default)]
            name: Option<String>,
        }
        let decoded: Empty = decode_json(&response(200, "{}")).expect("decode {}");
        assert!(decoded.name.is_none());
    }

    #[test]
    fn test_error_envelope_key_priority() {
        let err = error_from_response(&response(
            400,
            json!({
                "statusCode": 400,
                "error": "invalid_query_string",
                "message": "fallback",
                "error_description": "Query validation error"
            })
            .to_string(),
        ));
        match err {
            Auth0Error::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code.as_deref(), Some("invalid_query_string"));
                assert_eq!(message, "Query validation error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_envelope_with_only_code_uses_code_as_message() {
        let err = error_from_response(&response(403, r#"{"error":"insufficient_scope"}"#));
        match err {
            Auth0Error::Api { code, message, .. } => {
                assert_eq!(code.as_deref(), Some("insufficient_scope"));
                assert_eq!(message, "insufficient_scope");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_json_error_body_is_malformed_error_response() {
        let err = error_from_response(&response(502, "<html>Bad Gateway</html>"));
        match err {
            Auth0Error::MalformedErrorResponse { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "<html>Bad Gateway</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_json_object_without_envelope_keys_is_malformed() {
        let err = error_from_response(&response(500, r#"{"unexpected":true}"#));
        assert!(matches!(
            err,
            Auth0Error::MalformedErrorResponse { status: 500, .. }
        ));
    }

    #[test]
    fn test_decode_json_surfaces_remote_error() {
        let err = decode_json::<Thing>(&response(
            404,
            r#"{"error":"not_found","message":"no such user"}"#,
        ))
        .expect_err("404 should error");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_json_eq_numeric_tolerance() {
        assert!(json_eq(&json!(1), &json!(1.0)));
        assert!(json_eq(&json!({"total": 5}), &json!({"total": 5.0})));
        assert!(!json_eq(&json!(1), &json!(1.1)));
        assert!(json_eq(
            &json!({"a": [1, 2.0], "b": "x"}),
            &json!({"b": "x", "a": [1.0, 2]})
        ));
        assert!(!json_eq(&json!([1, 2]), &json!([2, 1])));
        assert!(!json_eq(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }
}
