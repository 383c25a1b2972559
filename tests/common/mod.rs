//! Shared test fixtures: a fake upstream API on an ephemeral port.
//!
//! The fake counts every request it receives, so tests can assert that
//! short-circuiting code paths (missing credential, unknown tool, the
//! knowledge base) never touch the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Handle to a running fake upstream.
pub struct FakeUpstream {
    /// Base URL to hand to the router under test.
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FakeUpstream {
    /// Number of requests the upstream has received.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts the fake upstream on an ephemeral port.
///
/// Routes:
/// - `GET /mockups` — 200 with a template list; echoes the received
///   `x-api-key` header so credential tests can observe it
/// - `POST /renders` — 200 echoing the request body under `received`
/// - `POST /collections` — 422 with an upstream-style message
/// - `POST /renders/bulk` — 500
pub async fn spawn_fake_upstream() -> FakeUpstream {
    let hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route("/mockups", get(list_mockups))
        .route("/renders", post(echo_render))
        .route("/collections", post(reject_collection))
        .route("/renders/bulk", post(server_error))
        .with_state(Arc::clone(&hits));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake upstream");
    let addr = listener.local_addr().expect("fake upstream addr");

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    FakeUpstream {
        base_url: format!("http://{addr}"),
        hits,
    }
}

async fn list_mockups(
    State(hits): State<Arc<AtomicUsize>>,
    headers: HeaderMap,
) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    let key_seen = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(json!({
        "data": [{"uuid": "m-1", "name": "T-Shirt Front"}],
        "total": 1,
        "key_seen": key_seen,
    }))
}

async fn echo_render(
    State(hits): State<Arc<AtomicUsize>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "export_path": "https://cdn.example/render.webp",
        "received": body,
    }))
}

async fn reject_collection(State(hits): State<Arc<AtomicUsize>>) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"message": "Collection name already exists"})),
    )
}

async fn server_error(State(hits): State<Arc<AtomicUsize>>) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}
