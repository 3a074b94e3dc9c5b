//! Fake upstream posts provider
//!
//! Serves `GET /users/{username}/posts` on a random port with a canned
//! reply, so the real `UpstreamClient` can be exercised end to end.

use super::constants::*;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub enum UpstreamReply {
    /// 200 with `{"data": [...]}` built from `(id, text)` pairs
    Posts(Vec<(&'static str, &'static str)>),
    /// Bare status code with an empty body
    Status(u16),
    /// 200 with a body that is not the expected JSON
    Garbage,
}

#[derive(Clone)]
struct MockState {
    reply: UpstreamReply,
    hits: Arc<AtomicUsize>,
}

async fn user_posts(
    State(state): State<MockState>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let expected = format!("Bearer {}", UPSTREAM_TOKEN);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false);
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match state.reply {
        UpstreamReply::Posts(posts) => {
            let data: Vec<serde_json::Value> = posts
                .iter()
                .map(|(id, text)| {
                    json!({
                        "id": id,
                        "text": text,
                        "created_at": "2025-04-06T14:30:00.000Z",
                        "author": username,
                    })
                })
                .collect();
            Json(json!({ "data": data })).into_response()
        }
        UpstreamReply::Status(code) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        UpstreamReply::Garbage => "definitely not json".into_response(),
    }
}

/// Running fake provider. Shuts down when dropped.
pub struct MockUpstream {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockUpstream {
    pub async fn spawn(reply: UpstreamReply) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = MockState {
            reply,
            hits: hits.clone(),
        };
        let app = Router::new()
            .route("/users/{username}/posts", get(user_posts))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock upstream");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Mock upstream failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            hits,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Number of requests the provider received
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
