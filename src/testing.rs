//! In-process stand-in for the remote PPT API.

use crate::config::Config;
use axum::Router;
use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub form: HashMap<String, String>,
    pub authorization: Option<String>,
}

#[derive(Clone)]
struct Canned {
    status: u16,
    body: String,
    location: Option<String>,
}

#[derive(Default)]
struct Inner {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<HashMap<String, VecDeque<Canned>>>,
    delay: Mutex<Option<Duration>>,
}

#[derive(Clone)]
pub struct MockApi {
    addr: SocketAddr,
    inner: Arc<Inner>,
}

impl MockApi {
    pub async fn start() -> Self {
        let inner = Arc::new(Inner::default());
        let app = Router::new()
            .route("/apps/{*rest}", get(on_get).post(on_post))
            .with_state(inner.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock");
        let addr = listener.local_addr().expect("mock addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self { addr, inner }
    }

    pub fn base(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self, api_key: Option<&str>) -> Arc<Config> {
        Arc::new(Config::new(
            api_key.map(str::to_string),
            self.base(),
            "127.0.0.1:0".parse().expect("addr"),
        ))
    }

    /// Queues a JSON response for `path`. The last queued response repeats.
    pub fn respond(&self, path: &str, status: u16, body: Value) {
        self.respond_raw(path, status, &body.to_string());
    }

    pub fn respond_raw(&self, path: &str, status: u16, body: &str) {
        self.push(
            path,
            Canned {
                status,
                body: body.to_string(),
                location: None,
            },
        );
    }

    /// Queues a 3xx pointing at `location`, with a JSON body of its own.
    pub fn redirect(&self, path: &str, status: u16, location: &str) {
        self.push(
            path,
            Canned {
                status,
                body: serde_json::json!({"code": status, "msg": "moved"}).to_string(),
                location: Some(location.to_string()),
            },
        );
    }

    fn push(&self, path: &str, canned: Canned) {
        self.inner
            .responses
            .lock()
            .expect("responses lock")
            .entry(path.to_string())
            .or_default()
            .push_back(canned);
    }

    pub fn delay(&self, delay: Duration) {
        *self.inner.delay.lock().expect("delay lock") = Some(delay);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.calls.lock().expect("calls lock").clone()
    }
}

/// A config whose API base points at a port nothing listens on.
pub async fn closed_port_config() -> Arc<Config> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    Arc::new(Config::new(
        Some("secret".to_string()),
        format!("http://{addr}"),
        "127.0.0.1:0".parse().expect("addr"),
    ))
}

async fn on_get(
    State(inner): State<Arc<Inner>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    record(&inner, method, uri, &headers, query, HashMap::new()).await
}

async fn on_post(
    State(inner): State<Arc<Inner>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    record(&inner, method, uri, &headers, query, form).await
}

async fn record(
    inner: &Inner,
    method: Method,
    uri: Uri,
    headers: &HeaderMap,
    query: HashMap<String, String>,
    form: HashMap<String, String>,
) -> Response {
    let path = uri.path().to_string();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    inner.calls.lock().expect("calls lock").push(RecordedCall {
        method: method.to_string(),
        path: path.clone(),
        query,
        form,
        authorization,
    });

    let delay = *inner.delay.lock().expect("delay lock");
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let canned = {
        let mut responses = inner.responses.lock().expect("responses lock");
        responses.get_mut(&path).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        })
    };

    let Some(canned) = canned else {
        return (StatusCode::NOT_FOUND, "no canned response").into_response();
    };
    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        canned.body,
    )
        .into_response();
    if let Some(location) = canned.location
        && let Ok(value) = location.parse()
    {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}
