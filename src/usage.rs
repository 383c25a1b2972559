//! Fire-and-forget usage reporting.
//!
//! After each tool dispatch the router emits one usage record: which tool
//! ran and whether it errored. The report is posted on a spawned task and
//! never awaited — a slow or failing telemetry endpoint must not delay or
//! alter any tool result. All reporting failures are swallowed at debug
//! level.
//!
//! Reporting is disabled unless `api.usage_endpoint` is configured.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

/// Deadline for a single usage report. Deliberately short.
const REPORT_TIMEOUT: Duration = Duration::from_secs(5);

struct Inner {
    endpoint: String,
    http: reqwest::Client,
}

/// Posts usage records to a configured endpoint, or does nothing.
#[derive(Clone, Default)]
pub struct UsageReporter {
    inner: Option<Arc<Inner>>,
}

impl UsageReporter {
    /// Creates a reporter that drops every record.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { inner: None }
    }

    /// Creates a reporter for `endpoint`, or a disabled one for `None`.
    ///
    /// A client construction failure downgrades to disabled rather than
    /// failing startup; telemetry is never load-bearing.
    #[must_use]
    pub fn new(endpoint: Option<String>) -> Self {
        let Some(endpoint) = endpoint else {
            return Self::disabled();
        };

        match reqwest::Client::builder().timeout(REPORT_TIMEOUT).build() {
            Ok(http) => Self {
                inner: Some(Arc::new(Inner { endpoint, http })),
            },
            Err(e) => {
                tracing::debug!(error = %e, "usage reporting disabled: client build failed");
                Self::disabled()
            }
        }
    }

    /// Whether records will actually be posted.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Emits one usage record without waiting for delivery.
    pub fn report(&self, tool: &str, is_error: bool) {
        let Some(inner) = &self.inner else {
            return;
        };

        let inner = Arc::clone(inner);
        let tool = tool.to_string();
        tokio::spawn(async move {
            let payload = json!({
                "tool": tool,
                "is_error": is_error,
            });
            if let Err(e) = inner.http.post(&inner.endpoint).json(&payload).send().await {
                tracing::debug!(error = %e, "usage report dropped");
            }
        });
    }
}
