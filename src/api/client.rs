//! Upstream HTTP client, built per invocation.
//!
//! The client factory binds one resolved credential to a `reqwest` client
//! with the fixed header set and the fixed request deadline. Construction
//! is per-invocation: a client never outlives the credential it was bound
//! to, so no credential is ever shared across invocations.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use crate::api::error::{ApiError, ApiResult};

/// Fixed deadline for every upstream call. Render operations are slow.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Header the upstream expects the API key under.
const UPSTREAM_KEY_HEADER: &str = "x-api-key";

/// HTTP method of an upstream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Read operation; projected fields travel as query parameters.
    Get,
    /// Mutating operation; projected fields travel as a JSON body.
    Post,
    /// Removal operation; no payload beyond the path.
    Delete,
}

/// One fully-projected upstream request.
///
/// The path has path parameters already substituted; `query` and `body`
/// contain exactly the fields the caller supplied — absent optional fields
/// are omitted, never null.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the base URL, with a leading slash.
    pub path: String,
    /// Query parameters (GET requests).
    pub query: Vec<(String, String)>,
    /// JSON body (POST requests).
    pub body: Option<Value>,
}

/// Response from the upstream API for statuses below 500.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code (2xx–4xx).
    pub status: u16,
    /// Parsed JSON body. Non-JSON bodies are kept as a JSON string; empty
    /// bodies become null.
    pub body: Value,
}

impl ApiResponse {
    /// Whether the upstream accepted the request.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// A configured client bound to one credential and the fixed base address.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client bound to `api_key`.
    ///
    /// An absent credential binds an empty key header; the upstream rejects
    /// the call with an auth error, which the normaliser surfaces. The
    /// router short-circuits that case before construction in practice.
    ///
    /// # Errors
    ///
    /// Returns an error if the key contains bytes not permitted in an HTTP
    /// header or the underlying client cannot be constructed.
    pub fn new(base_url: &str, api_key: Option<&str>) -> ApiResult<Self> {
        let mut key_value =
            HeaderValue::from_str(api_key.unwrap_or("")).map_err(|_| ApiError::ClientBuild {
                message: "API key contains characters not permitted in an HTTP header".to_string(),
            })?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(UPSTREAM_KEY_HEADER, key_value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Executes one upstream request.
    ///
    /// # Errors
    ///
    /// Returns an error for timeouts, connection failures, other transport
    /// faults, and upstream statuses >= 500. Statuses below 500 — including
    /// auth and validation rejections — come back as `Ok(ApiResponse)`.
    pub async fn execute(&self, request: UpstreamRequest) -> ApiResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
            HttpMethod::Delete => self.http.delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(classify_transport_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(classify_transport_error)?;

        if status >= 500 {
            return Err(ApiError::Upstream { status, body: text });
        }

        Ok(ApiResponse {
            status,
            body: parse_body(&text),
        })
    }
}

/// Maps a reqwest failure onto the error taxonomy.
fn classify_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else if error.is_connect() {
        ApiError::Connect {
            message: error.to_string(),
        }
    } else {
        ApiError::Transport {
            message: error.to_string(),
        }
    }
}

/// Parses a response body, tolerating non-JSON payloads.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_and_without_credential() {
        assert!(ApiClient::new("https://mockups.example/api/v1", Some("dm_key")).is_ok());
        assert!(ApiClient::new("https://mockups.example/api/v1", None).is_ok());
    }

    #[test]
    fn client_rejects_unsendable_key() {
        let result = ApiClient::new("https://mockups.example/api/v1", Some("bad\nkey"));
        assert!(matches!(result, Err(ApiError::ClientBuild { .. })));
    }

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let client = ApiClient::new("https://mockups.example/api/v1/", None).unwrap();
        assert_eq!(client.base_url, "https://mockups.example/api/v1");
    }

    #[test]
    fn parse_body_handles_json_text_and_empty() {
        assert_eq!(
            parse_body(r#"{"ok":true}"#),
            serde_json::json!({"ok": true})
        );
        assert_eq!(
            parse_body("plain text error page"),
            Value::String("plain text error page".to_string())
        );
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("   "), Value::Null);
    }

    #[test]
    fn api_response_success_boundary() {
        let ok = ApiResponse {
            status: 399,
            body: Value::Null,
        };
        let rejected = ApiResponse {
            status: 400,
            body: Value::Null,
        };
        assert!(ok.is_success());
        assert!(!rejected.is_success());
    }
}
