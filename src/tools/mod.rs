//! Tool catalog, router, and response normalisation.
//!
//! The router is the failure boundary of the whole system: given a tool
//! name, arguments, and the transport context, it always produces exactly
//! one [`ToolCallResult`] — unknown names, missing credentials, upstream
//! rejections, timeouts, and network failures included. Nothing escapes to
//! the transport layer.
//!
//! Every network tool follows one template, driven by its entry in the
//! [`catalog`] projection table: resolve credential, validate required
//! fields, project the arguments onto an upstream request (omitting absent
//! optional fields — never sending nulls), execute, normalise. The
//! knowledge base tool short-circuits locally.

pub mod catalog;
pub mod kb;
pub mod normalize;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::api::{ApiClient, HttpMethod, UpstreamRequest};
use crate::auth::{resolve_api_key, TransportContext};
use crate::usage::UsageReporter;

pub use catalog::{ToolDefinition, ToolSpec};

/// Content item in a tool call response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

/// Result of a tool call: the single normalised output shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the tool call resulted in an error.
    #[serde(skip_serializing_if = "is_false")]
    pub is_error: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if requires a predicate fn(&T) -> bool, so we must take &bool here
const fn is_false(b: &bool) -> bool {
    !*b
}

impl ToolCallResult {
    /// Creates a successful text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Creates an error text result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// The text payload of the first content block.
    #[must_use]
    pub fn text_content(&self) -> &str {
        match &self.content[..] {
            [ToolContent::Text { text }, ..] => text,
            [] => "",
        }
    }
}

/// Routes tool invocations to their handlers.
///
/// Session-agnostic and internally immutable: one router instance serves
/// every session concurrently. The only state is configuration resolved at
/// startup.
pub struct ToolRouter {
    base_url: String,
    fallback_key: Option<String>,
    usage: UsageReporter,
}

impl ToolRouter {
    /// Creates a router bound to the upstream base URL and the process-wide
    /// fallback key.
    #[must_use]
    pub const fn new(
        base_url: String,
        fallback_key: Option<String>,
        usage: UsageReporter,
    ) -> Self {
        Self {
            base_url,
            fallback_key,
            usage,
        }
    }

    /// Returns the static tool catalog.
    #[must_use]
    pub fn definitions() -> Vec<ToolDefinition> {
        catalog::definitions()
    }

    /// Dispatches one invocation. Total: always returns a result, never
    /// propagates a failure.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: &Value,
        context: &TransportContext,
    ) -> ToolCallResult {
        let result = self.dispatch_inner(name, arguments, context).await;
        self.usage.report(name, result.is_error);
        result
    }

    async fn dispatch_inner(
        &self,
        name: &str,
        arguments: &Value,
        context: &TransportContext,
    ) -> ToolCallResult {
        if name == catalog::KNOWLEDGE_BASE_TOOL {
            return call_knowledge_base(arguments);
        }

        let Some(spec) = catalog::find(name) else {
            return normalize::unknown_tool(name);
        };

        self.call_network_tool(spec, arguments, context).await
    }

    /// The uniform handler template for every network tool.
    async fn call_network_tool(
        &self,
        spec: &ToolSpec,
        arguments: &Value,
        context: &TransportContext,
    ) -> ToolCallResult {
        // Credential check happens before anything touches the wire.
        let Some(api_key) = resolve_api_key(context, self.fallback_key.as_deref()) else {
            return normalize::missing_credential();
        };

        let request = match build_request(spec, arguments) {
            Ok(request) => request,
            Err(message) => return ToolCallResult::error(message),
        };

        let client = match ApiClient::new(&self.base_url, Some(&api_key)) {
            Ok(client) => client,
            Err(error) => return normalize::failure(&error, spec.name),
        };

        match client.execute(request).await {
            Ok(response) if response.is_success() => {
                normalize::success(spec.success_label, response.body)
            }
            Ok(response) => normalize::rejection(response.status, &response.body),
            Err(error) => normalize::failure(&error, spec.name),
        }
    }
}

/// Handles the local knowledge base tool. No credential, no network.
fn call_knowledge_base(arguments: &Value) -> ToolCallResult {
    let Some(topic) = arguments.get("topic").and_then(Value::as_str) else {
        return ToolCallResult::error("Missing required parameter: topic");
    };

    match kb::lookup(topic) {
        Some(guidance) => {
            let result = json!({
                "topic": topic,
                "guidance": guidance,
            });
            ToolCallResult::text(serde_json::to_string_pretty(&result).unwrap_or_default())
        }
        None => ToolCallResult::error(format!(
            "Unknown topic: {topic}. Available topics: {}",
            kb::topics().join(", ")
        )),
    }
}

/// Projects tool arguments onto an upstream request.
///
/// Required fields are copied verbatim (path parameters are substituted
/// into the path); optional fields are copied only when present. Absent
/// optional fields are omitted entirely — never sent as null.
fn build_request(spec: &ToolSpec, arguments: &Value) -> Result<UpstreamRequest, String> {
    let empty = Map::new();
    let args = arguments.as_object().unwrap_or(&empty);

    let mut path = spec.path.to_string();
    let mut payload = Map::new();

    for field in spec.required {
        let Some(value) = args.get(*field) else {
            return Err(format!("Missing required parameter: {field}"));
        };

        let placeholder = format!("{{{field}}}");
        if path.contains(&placeholder) {
            let Some(segment) = value.as_str() else {
                return Err(format!("Parameter '{field}' must be a string"));
            };
            // Path parameters become one URL segment; reject separators.
            if segment.is_empty() || segment.contains('/') {
                return Err(format!("Parameter '{field}' is not a valid identifier"));
            }
            path = path.replace(&placeholder, segment);
        } else {
            payload.insert((*field).to_string(), value.clone());
        }
    }

    for field in spec.optional {
        if let Some(value) = args.get(*field) {
            payload.insert((*field).to_string(), value.clone());
        }
    }

    let (query, body) = match spec.method {
        HttpMethod::Get => (to_query_pairs(payload), None),
        HttpMethod::Post => (Vec::new(), Some(Value::Object(payload))),
        // DELETE payloads are path-only by construction; anything projected
        // beyond the path travels as query parameters.
        HttpMethod::Delete => (to_query_pairs(payload), None),
    };

    Ok(UpstreamRequest {
        method: spec.method,
        path,
        query,
        body,
    })
}

/// Converts projected fields into query parameters.
fn to_query_pairs(payload: Map<String, Value>) -> Vec<(String, String)> {
    payload
        .into_iter()
        .map(|(name, value)| {
            let rendered = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (name, rendered)
        })
        .collect()
}
