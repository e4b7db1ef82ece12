use axum::Router;
use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Scripted remote API: each endpoint replays its queue, repeating the last entry.
#[derive(Clone, Default)]
pub struct Script {
    queues: Arc<Mutex<HashMap<&'static str, VecDeque<Value>>>>,
    pub hits: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl Script {
    pub fn push(&self, path: &'static str, body: Value) {
        self.queues
            .lock()
            .expect("queues")
            .entry(path)
            .or_default()
            .push_back(body);
    }

    fn next(&self, path: &'static str) -> Option<Value> {
        let mut queues = self.queues.lock().expect("queues");
        let queue = queues.get_mut(path)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }

    fn hit(&self, path: &str, id: Option<&String>, headers: &HeaderMap) {
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        self.hits.lock().expect("hits").push((
            path.to_string(),
            id.cloned().unwrap_or_default(),
            auth,
        ));
    }
}

pub async fn serve(script: Script) -> String {
    let app = Router::new()
        .route("/apps/ppt-create", post(create))
        .route("/apps/ppt-result", get(result))
        .route("/apps/ppt-download", get(download))
        .route("/apps/ppt-editor", post(editor))
        .with_state(script);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn reply(body: Option<Value>) -> Response {
    match body {
        Some(body) => (StatusCode::OK, axum::Json(body)).into_response(),
        None => (StatusCode::NOT_FOUND, axum::Json(json!({"code": 404}))).into_response(),
    }
}

async fn create(
    State(script): State<Script>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    script.hit("/apps/ppt-create", form.get("text"), &headers);
    reply(script.next("/apps/ppt-create"))
}

async fn result(
    State(script): State<Script>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    script.hit("/apps/ppt-result", query.get("id"), &headers);
    reply(script.next("/apps/ppt-result"))
}

async fn download(
    State(script): State<Script>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    script.hit("/apps/ppt-download", query.get("id"), &headers);
    reply(script.next("/apps/ppt-download"))
}

async fn editor(
    State(script): State<Script>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    script.hit("/apps/ppt-editor", form.get("id"), &headers);
    reply(script.next("/apps/ppt-editor"))
}
