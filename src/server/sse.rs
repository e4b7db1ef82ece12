//! Legacy MCP HTTP+SSE transport.
//!
//! `GET /sse` opens a stream whose first `endpoint` event names the URL the
//! client posts JSON-RPC messages to. Replies come back as `message` events on
//! that same stream.

use crate::client::ChatPptClient;
use crate::server::handle_message;
use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use futures::Stream;
use serde_json::Value;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

pub const SSE_PATH: &str = "/sse";
pub const MESSAGES_PATH: &str = "/messages";

type Sessions = Arc<Mutex<HashMap<String, mpsc::UnboundedSender<Value>>>>;

#[derive(Clone)]
struct SseState {
    client: Arc<ChatPptClient>,
    sessions: Sessions,
}

pub async fn run(client: Arc<ChatPptClient>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr().context("failed to read bound address")?;
    info!("serving MCP over SSE on http://{local}{SSE_PATH}");

    axum::serve(listener, router(client))
        .await
        .context("sse server failed")
}

pub fn router(client: Arc<ChatPptClient>) -> Router {
    let state = SseState {
        client,
        sessions: Arc::new(Mutex::new(HashMap::new())),
    };
    Router::new()
        .route(SSE_PATH, get(open_stream))
        .route(MESSAGES_PATH, post(post_message))
        .with_state(state)
}

/// Drops the session's sender once its stream goes away.
struct SessionGuard {
    sessions: Sessions,
    session_id: String,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions.remove(&self.session_id);
        debug!(session_id = %self.session_id, "sse session closed");
    }
}

async fn open_stream(
    State(state): State<SseState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let session_id = Uuid::new_v4().simple().to_string();
    let (tx, mut rx) = mpsc::unbounded_channel::<Value>();
    state
        .sessions
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .insert(session_id.clone(), tx);
    debug!(%session_id, "sse session opened");

    let guard = SessionGuard {
        sessions: state.sessions.clone(),
        session_id: session_id.clone(),
    };
    let endpoint = format!("{MESSAGES_PATH}?session_id={session_id}");

    let stream = async_stream::stream! {
        let _guard = guard;
        yield Ok(Event::default().event("endpoint").data(endpoint));
        while let Some(message) = rx.recv().await {
            yield Ok(Event::default().event("message").data(message.to_string()));
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn post_message(
    State(state): State<SseState>,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Response {
    let Some(session_id) = query.get("session_id") else {
        return (StatusCode::BAD_REQUEST, "session_id is required").into_response();
    };

    let sender = state
        .sessions
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(session_id)
        .cloned();
    let Some(sender) = sender else {
        return (StatusCode::NOT_FOUND, "unknown session").into_response();
    };

    let request: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(err) => {
            return (StatusCode::BAD_REQUEST, format!("invalid JSON: {err}")).into_response();
        }
    };

    let client = state.client.clone();
    tokio::spawn(async move {
        if let Some(response) = handle_message(&client, &request).await {
            let _ = sender.send(response);
        }
    });

    (StatusCode::ACCEPTED, "Accepted").into_response()
}
