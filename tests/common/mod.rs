//! Shared helpers: a scriptable mock upstream and relay state wiring.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use chat_relay::config::{RelayConfig, UpstreamConfig};
use chat_relay::state::{AppState, SharedState};
use serde_json::Value;
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";

/// What the mock answers to every request.
#[derive(Clone)]
pub struct MockReply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl MockReply {
    pub fn json(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    reply: MockReply,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

pub struct MockServer {
    pub url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockServer {
    pub async fn spawn(reply: MockReply) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(mock_handler).with_state(MockState {
            reply,
            calls: calls.clone(),
        });
        let addr = serve(app).await;
        Self {
            url: format!("http://{addr}/api/v1/run/flow"),
            calls,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn mock_handler(
    State(mock): State<MockState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    mock.calls.lock().unwrap().push(RecordedCall {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    if !mock.reply.delay.is_zero() {
        tokio::time::sleep(mock.reply.delay).await;
    }
    (
        mock.reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        mock.reply.body.clone(),
    )
}

pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A URL nothing is listening on.
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/v1/run/flow")
}

pub fn relay_config(upstream_url: &str, timeout: Option<Duration>) -> RelayConfig {
    RelayConfig {
        host: "127.0.0.1".into(),
        port: 0,
        static_dir: "public".into(),
        upstream: UpstreamConfig {
            url: upstream_url.to_string(),
            token: TOKEN.to_string(),
            timeout,
        },
    }
}

pub fn relay_state(upstream_url: &str, timeout: Option<Duration>) -> SharedState {
    Arc::new(AppState::new(&relay_config(upstream_url, timeout)).unwrap())
}
