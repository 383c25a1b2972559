//! HTTP transport binding with per-session routing.
//!
//! Exposes the MCP surface over HTTP on a unified `/mcp` endpoint:
//!
//! - `POST /mcp` — deliver one JSON-RPC message, receive its response
//! - `GET /mcp` — open a server-sent-events stream for the session
//! - `DELETE /mcp` — close the session
//!
//! Session identity travels in the `Mcp-Session-Id` request header. A
//! request without a recognised session id gets a fresh session; the
//! assigned id is echoed on every response. Closing a session removes its
//! registration, so a later request reusing the old id is simply an
//! unrecognised id — it gets a new session, not an error.
//!
//! Auxiliary endpoints: `GET /healthz` liveness probe and `GET /` with a
//! human-readable capability summary.
//!
//! Sessions are independent: each owns its own [`McpHandler`] lifecycle
//! state; the shared [`ToolRouter`] is internally immutable. The session
//! registry is the only process-wide mutable state, guarded by an async
//! `RwLock` and mutated only on create and close.

use std::collections::HashMap;
use std::convert::Infallible;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::{broadcast, mpsc, Mutex, RwLock};
use tokio_stream::wrappers::ReceiverStream;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::auth::TransportContext;
use crate::config::HttpConfig;
use crate::mcp::protocol::{
    parse_message, OutboundMessage, MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use crate::mcp::server::McpHandler;
use crate::tools::ToolRouter;

/// Header carrying the session token. Never carries credentials.
pub const SESSION_HEADER: &str = "mcp-session-id";

/// Interval between SSE keepalive comments.
const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// One HTTP session: its own lifecycle state, shared router.
struct HttpSession {
    /// Opaque session token.
    id: String,
    /// When the session was created.
    created_at: DateTime<Utc>,
    /// Per-session MCP lifecycle state machine.
    handler: Mutex<McpHandler>,
    /// Fired once when the session closes; ends any open event stream.
    closed: broadcast::Sender<()>,
}

impl HttpSession {
    fn new(id: String, router: Arc<ToolRouter>) -> Self {
        let (closed, _) = broadcast::channel(1);
        Self {
            id,
            created_at: Utc::now(),
            handler: Mutex::new(McpHandler::new(router)),
            closed,
        }
    }

    fn close(&self) {
        // Nothing to do if no stream is listening.
        let _ = self.closed.send(());
    }
}

/// Shared state behind the axum router.
pub struct AppState {
    router: Arc<ToolRouter>,
    sessions: RwLock<HashMap<String, Arc<HttpSession>>>,
}

impl AppState {
    /// Creates empty state around the shared tool router.
    #[must_use]
    pub fn new(router: Arc<ToolRouter>) -> Self {
        Self {
            router,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves the session for a request, creating one when the header is
    /// absent or names a session this process does not know.
    async fn session_for(&self, headers: &HeaderMap) -> Arc<HttpSession> {
        if let Some(id) = headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok()) {
            if let Some(session) = self.sessions.read().await.get(id) {
                return Arc::clone(session);
            }
        }

        let id = Uuid::new_v4().to_string();
        let session = Arc::new(HttpSession::new(id.clone(), Arc::clone(&self.router)));
        self.sessions
            .write()
            .await
            .insert(id, Arc::clone(&session));
        tracing::debug!(session_id = %session.id, "session created");
        session
    }

    /// Removes a session registration. Returns whether it existed.
    async fn close_session(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id);
        if let Some(session) = removed {
            session.close();
            let age = Utc::now().signed_duration_since(session.created_at);
            tracing::debug!(session_id = %id, age_secs = age.num_seconds(), "session closed");
            true
        } else {
            false
        }
    }

    /// Number of live sessions.
    async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Builds the axum application.
#[must_use]
pub fn app(router: Arc<ToolRouter>, allowed_origins: &[String]) -> Router {
    let state = Arc::new(AppState::new(router));

    Router::new()
        .route("/", get(handle_summary))
        .route("/healthz", get(handle_health))
        .route(
            "/mcp",
            get(handle_stream).post(handle_message).delete(handle_close),
        )
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Serves the HTTP transport until interrupted.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails — the
/// only fatal error paths of the process.
pub async fn serve(router: Arc<ToolRouter>, http: &HttpConfig) -> io::Result<()> {
    let application = app(router, &http.allowed_origins);
    let addr = format!("{}:{}", http.host, http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(addr = %addr, "HTTP transport listening");

    axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Resolves when a termination signal arrives.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
}

/// Builds the CORS layer from the configured origin list.
///
/// An empty list allows any origin; otherwise only the listed origins.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([axum::http::HeaderName::from_static(SESSION_HEADER)]);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    layer.allow_origin(origins)
}

/// Converts request headers into the transport context the resolver reads.
fn transport_context(headers: &HeaderMap) -> TransportContext {
    TransportContext::from_pairs(
        headers
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v))),
    )
}

/// Echoes the session id on a response.
fn with_session_header(id: &str, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    if let Ok(value) = HeaderValue::from_str(id) {
        response
            .headers_mut()
            .insert(axum::http::HeaderName::from_static(SESSION_HEADER), value);
    }
    response
}

/// `POST /mcp` — one JSON-RPC message in, its response out.
async fn handle_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let session = state.session_for(&headers).await;
    let context = transport_context(&headers);

    let outbound = match parse_message(&body) {
        Ok(msg) => {
            let mut handler = session.handler.lock().await;
            handler.handle_message(msg, &context).await
        }
        Err(error) => Some(OutboundMessage::Error(error)),
    };

    match outbound {
        Some(message) => with_session_header(&session.id, (StatusCode::OK, Json(message))),
        // Notifications produce no response body.
        None => with_session_header(&session.id, StatusCode::ACCEPTED),
    }
}

/// `GET /mcp` — open the session's event stream.
///
/// The server initiates no messages of its own, so the stream carries one
/// `connected` event and keepalives until the session closes.
async fn handle_stream(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let session = state.session_for(&headers).await;

    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(1);
    let mut closed = session.closed.subscribe();
    let session_id = session.id.clone();

    tokio::spawn(async move {
        let connected = Event::default().event("connected").data(&session_id);
        if tx.send(Ok(connected)).await.is_err() {
            return;
        }
        // Hold the sender open until the session closes; dropping it ends
        // the stream on the client side.
        let _ = closed.recv().await;
    });

    let sse = Sse::new(ReceiverStream::new(rx)).keep_alive(
        KeepAlive::new()
            .interval(KEEPALIVE_INTERVAL)
            .text("keepalive"),
    );

    with_session_header(&session.id, sse)
}

/// `DELETE /mcp` — close a session.
async fn handle_close(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(id) = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
    else {
        return (StatusCode::BAD_REQUEST, "missing Mcp-Session-Id header").into_response();
    };

    if state.close_session(&id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::NOT_FOUND, "unknown session").into_response()
    }
}

/// `GET /healthz` — liveness probe.
async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /` — human-readable capability summary.
async fn handle_summary(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "name": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "protocol_version": MCP_PROTOCOL_VERSION,
        "tools": ToolRouter::definitions().len(),
        "sessions": state.session_count().await,
        "endpoints": {
            "mcp": "/mcp",
            "health": "/healthz",
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::UsageReporter;

    fn test_state() -> AppState {
        AppState::new(Arc::new(ToolRouter::new(
            "http://127.0.0.1:9".to_string(),
            None,
            UsageReporter::disabled(),
        )))
    }

    fn headers_with_session(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::HeaderName::from_static(SESSION_HEADER),
            HeaderValue::from_str(id).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn absent_session_header_creates_session() {
        let state = test_state();
        let session = state.session_for(&HeaderMap::new()).await;
        assert_eq!(state.session_count().await, 1);
        assert!(!session.id.is_empty());
    }

    #[tokio::test]
    async fn recognised_session_is_reused() {
        let state = test_state();
        let first = state.session_for(&HeaderMap::new()).await;
        let second = state.session_for(&headers_with_session(&first.id)).await;
        assert_eq!(first.id, second.id);
        assert_eq!(state.session_count().await, 1);
    }

    #[tokio::test]
    async fn unknown_session_id_creates_new_session() {
        let state = test_state();
        let session = state.session_for(&headers_with_session("no-such-session")).await;
        assert_ne!(session.id, "no-such-session");
        assert_eq!(state.session_count().await, 1);
    }

    #[tokio::test]
    async fn closed_session_id_is_unrecognised() {
        let state = test_state();
        let session = state.session_for(&HeaderMap::new()).await;
        let old_id = session.id.clone();

        assert!(state.close_session(&old_id).await);
        assert_eq!(state.session_count().await, 0);

        // Reusing the closed id yields a fresh session, not an error.
        let replacement = state.session_for(&headers_with_session(&old_id)).await;
        assert_ne!(replacement.id, old_id);
    }

    #[tokio::test]
    async fn closing_unknown_session_reports_false() {
        let state = test_state();
        assert!(!state.close_session("never-existed").await);
    }

    #[test]
    fn transport_context_carries_auth_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer key-1"),
        );
        let context = transport_context(&headers);
        assert_eq!(context.header("authorization"), Some("Bearer key-1"));
    }

    #[test]
    fn cors_layer_accepts_origin_lists() {
        // Both shapes must construct without panicking.
        let _any = cors_layer(&[]);
        let _restricted = cors_layer(&["https://studio.example.com".to_string()]);
    }
}
