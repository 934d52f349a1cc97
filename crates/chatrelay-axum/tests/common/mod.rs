//! Shared helpers: a fake completion provider and request plumbing.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use chatrelay_axum::{bootstrap, create_router};
use chatrelay_core::RelayConfig;

pub const TEST_KEY: &str = "sk-or-v1-0123456789abcdef";
pub const TEST_MODEL: &str = "test/model:free";

/// What the fake provider answers with.
#[derive(Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Canned {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Observations recorded by the fake provider.
#[derive(Default)]
pub struct Recorded {
    pub hits: AtomicUsize,
    pub last_body: Mutex<Option<Value>>,
    pub last_headers: Mutex<Option<HeaderMap>>,
}

impl Recorded {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Value {
        self.last_body.lock().unwrap().clone().expect("no request recorded")
    }

    pub fn last_header(&self, name: &str) -> Option<String> {
        self.last_headers
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|h| h.get(name))
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    }
}

#[derive(Clone)]
struct ProviderState {
    canned: Canned,
    recorded: Arc<Recorded>,
}

async fn completions(
    State(state): State<ProviderState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.recorded.hits.fetch_add(1, Ordering::SeqCst);
    *state.recorded.last_body.lock().unwrap() = serde_json::from_slice(&body).ok();
    *state.recorded.last_headers.lock().unwrap() = Some(headers);

    if !state.canned.delay.is_zero() {
        tokio::time::sleep(state.canned.delay).await;
    }

    let status = StatusCode::from_u16(state.canned.status).unwrap();
    (status, state.canned.body.clone()).into_response()
}

/// Start a fake provider on an ephemeral port. Returns its endpoint URL.
pub async fn spawn_provider(canned: Canned) -> (String, Arc<Recorded>) {
    let recorded = Arc::new(Recorded::default());
    let state = ProviderState {
        canned,
        recorded: Arc::clone(&recorded),
    };

    let app = Router::new()
        .route("/api/v1/chat/completions", post(completions))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api/v1/chat/completions"), recorded)
}

pub fn relay_config(endpoint: &str) -> RelayConfig {
    RelayConfig::new(TEST_KEY)
        .with_model(TEST_MODEL)
        .with_endpoint(endpoint)
}

/// Relay router pointed at a fresh fake provider.
pub async fn relay_with(canned: Canned) -> (Router, Arc<Recorded>) {
    let (endpoint, recorded) = spawn_provider(canned).await;
    let ctx = bootstrap(relay_config(&endpoint)).unwrap();
    (create_router(ctx, None), recorded)
}

pub async fn post_chat(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&body).into_owned())
        })
    };
    (status, json)
}
