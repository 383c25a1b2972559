//! Response normalisation.
//!
//! Every tool invocation ends here: upstream responses, transport
//! failures, and precondition failures all collapse into the one
//! [`ToolCallResult`] shape the protocol layer serialises. The rules, in
//! priority order:
//!
//! 1. Missing credential — no upstream call was made
//! 2. Upstream rejected the request (status >= 400 below 500)
//! 3. Timeout
//! 4. Connection failure
//! 5. Anything else that failed inside a handler
//! 6. Success
//!
//! Upstream 5xx responses arrive as [`ApiError::Upstream`] and share the
//! "unavailable" shape with connection failures: the caller cannot act
//! differently on either.
//!
//! Content is rendered as indented JSON text; a plain string stays plain.
//! The calling protocol consumes text blocks, so this is a required final
//! step, not a convenience.

use serde_json::{json, Map, Value};

use crate::api::ApiError;

use super::ToolCallResult;

/// Rule 1: no credential was resolvable. Nothing was sent upstream.
pub fn missing_credential() -> ToolCallResult {
    ToolCallResult::error(render(&json!({
        "error": "API key not configured",
        "detail": "Provide a key via an 'Authorization: Bearer <key>' or 'x-api-key' \
                   request header, the DYNAMIC_MOCKUPS_API_KEY environment variable, \
                   the --api-key flag, or the config file.",
    })))
}

/// The requested tool name has no handler. Nothing was sent upstream.
pub fn unknown_tool(name: &str) -> ToolCallResult {
    ToolCallResult::error(format!("Unknown tool: {name}"))
}

/// Rule 2: the upstream rejected the request (4xx).
///
/// The upstream-provided message is surfaced verbatim when present, and
/// the raw body travels along for diagnostics.
pub fn rejection(status: u16, body: &Value) -> ToolCallResult {
    let message = upstream_message(body)
        .map_or_else(|| format!("API error ({status})"), String::from);

    ToolCallResult::error(render(&json!({
        "error": message,
        "status": status,
        "detail": body,
    })))
}

/// Rules 3–5: the call itself failed.
///
/// `context` names the operation for rule 5; rules 3 and 4 carry fixed
/// remediation guidance instead.
pub fn failure(error: &ApiError, context: &str) -> ToolCallResult {
    let content = match error {
        ApiError::Timeout => json!({
            "error": "Request timed out",
            "detail": "The operation may still complete upstream. Retry, and split \
                       large batch renders into smaller batches.",
        }),
        ApiError::Connect { .. } => json!({
            "error": "Network error",
            "detail": "Could not reach the mockup API. Check connectivity and the \
                       configured base URL.",
        }),
        ApiError::Upstream { status, body } => json!({
            "error": format!("Mockup API unavailable ({status})"),
            "status": status,
            "detail": body,
        }),
        ApiError::ClientBuild { .. } | ApiError::Transport { .. } => json!({
            "error": format!("{context}: {error}"),
        }),
    };

    ToolCallResult::error(render(&content))
}

/// Rule 6: the upstream accepted the request (status < 400).
///
/// Tools with a success label get `{"message": label}` merged ahead of the
/// upstream body fields; everything else returns the body verbatim.
pub fn success(label: Option<&str>, body: Value) -> ToolCallResult {
    let content = match (label, body) {
        (Some(label), Value::Object(fields)) => {
            let mut merged = Map::with_capacity(fields.len() + 1);
            merged.insert("message".to_string(), Value::String(label.to_string()));
            merged.extend(fields);
            Value::Object(merged)
        }
        (Some(label), Value::Null) => json!({ "message": label }),
        (Some(label), body) => json!({ "message": label, "result": body }),
        (None, body) => body,
    };

    ToolCallResult::text(render(&content))
}

/// Extracts the upstream's own error message, if the body carries one.
fn upstream_message(body: &Value) -> Option<&str> {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
}

/// Renders content as indented JSON text; a plain string stays plain.
fn render(value: &Value) -> String {
    if let Value::String(text) = value {
        return text.clone();
    }
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|_| "failed to serialise result".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(result: &ToolCallResult) -> &str {
        result.text_content()
    }

    #[test]
    fn missing_credential_shape() {
        let result = missing_credential();
        assert!(result.is_error);
        let text = text_of(&result);
        assert!(text.contains("API key not configured"));
        assert!(text.contains("DYNAMIC_MOCKUPS_API_KEY"));
    }

    #[test]
    fn unknown_tool_includes_name() {
        let result = unknown_tool("does_not_exist");
        assert!(result.is_error);
        assert!(text_of(&result).contains("Unknown tool: does_not_exist"));
    }

    #[test]
    fn rejection_surfaces_upstream_message_and_status() {
        let body = json!({"message": "Invalid mockup_uuid", "errors": {"mockup_uuid": ["bad"]}});
        let result = rejection(422, &body);
        assert!(result.is_error);
        let text = text_of(&result);
        assert!(text.contains("Invalid mockup_uuid"));
        assert!(text.contains("422"));
    }

    #[test]
    fn rejection_without_message_is_generic() {
        let result = rejection(418, &json!({"weird": true}));
        assert!(text_of(&result).contains("API error (418)"));
    }

    #[test]
    fn timeout_failure_suggests_smaller_batches() {
        let result = failure(&ApiError::Timeout, "render_batch");
        assert!(result.is_error);
        assert!(text_of(&result).contains("smaller batches"));
    }

    #[test]
    fn connect_failure_mentions_connectivity() {
        let error = ApiError::Connect {
            message: "dns failure".to_string(),
        };
        let result = failure(&error, "list_mockups");
        assert!(text_of(&result).contains("Network error"));
    }

    #[test]
    fn server_error_shares_unavailable_shape() {
        let error = ApiError::Upstream {
            status: 502,
            body: "bad gateway".to_string(),
        };
        let result = failure(&error, "render_mockup");
        let text = text_of(&result);
        assert!(text.contains("unavailable"));
        assert!(text.contains("502"));
    }

    #[test]
    fn success_without_label_is_verbatim() {
        let body = json!({"mockups": [{"uuid": "abc"}], "total": 1});
        let result = success(None, body.clone());
        assert!(!result.is_error);
        let parsed: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(parsed, body);
    }

    #[test]
    fn success_with_label_merges_message_first() {
        let body = json!({"export_path": "https://cdn.example/render.webp"});
        let result = success(Some("Render queued"), body);
        let parsed: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(parsed["message"], "Render queued");
        assert_eq!(parsed["export_path"], "https://cdn.example/render.webp");
    }

    #[test]
    fn success_with_label_and_empty_body() {
        let result = success(Some("PSD template deleted"), Value::Null);
        let parsed: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(parsed["message"], "PSD template deleted");
    }

    #[test]
    fn plain_string_body_stays_plain() {
        let result = success(None, Value::String("already text".to_string()));
        assert_eq!(text_of(&result), "already text");
    }
}
