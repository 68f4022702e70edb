//! In-process stand-in for the chat-completion endpoint, used by unit tests.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use crate::config::ApiConfig;

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    body: String,
    delay: Duration,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

pub struct FakeEndpoint {
    pub url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl FakeEndpoint {
    pub async fn start(status: StatusCode, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: StatusCode, body: &str, delay: Duration) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            status,
            body: body.to_string(),
            delay,
            seen: seen.clone(),
        };
        let app = Router::new()
            .route("/v1/chat/completions", post(complete))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake endpoint");
        let addr = listener.local_addr().expect("fake endpoint address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake endpoint server");
        });

        Self {
            url: format!("http://{addr}/v1/chat/completions"),
            seen,
        }
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().expect("fake endpoint mutex").clone()
    }
}

async fn complete(
    State(state): State<FakeState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state
        .seen
        .lock()
        .expect("fake endpoint mutex")
        .push(SeenRequest {
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
            body: serde_json::from_str(&body).unwrap_or(Value::Null),
        });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

pub fn api_config(endpoint: &str, token: Option<&str>) -> ApiConfig {
    ApiConfig {
        token: token.map(str::to_string),
        endpoint: endpoint.to_string(),
        model: "test-model".to_string(),
        ..ApiConfig::default()
    }
}
