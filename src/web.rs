use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::any::Any;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::WebConfig;
use crate::error::{QaError, Result};
use crate::models::{AskRequest, AskResponse};
use crate::service::QaService;

const INDEX_HTML: &str = include_str!("../templates/index.html");
const INVALID_BODY: &str = "Invalid request: No JSON data received.";
const EMPTY_QUESTION: &str = "Please enter a valid question.";

/// Routes for the web form: `GET /`, `POST /ask` and `GET /health`
pub fn router(service: QaService) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ask", post(ask))
        .route("/health", get(|| async { "ok" }))
        .with_state(service)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
            tracing::info_span!(
                "request",
                id = %uuid::Uuid::new_v4(),
                method = %req.method(),
                path = %req.uri().path(),
            )
        }))
}

pub async fn serve(cfg: &WebConfig, service: QaService) -> Result<()> {
    let bind: SocketAddr = cfg
        .bind
        .parse()
        .map_err(|e| QaError::Config(format!("Invalid bind address {}: {e}", cfg.bind)))?;

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, "Starting web server");

    axum::serve(listener, router(service)).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn ask(
    State(service): State<QaService>,
    payload: std::result::Result<Json<AskRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!("Rejected /ask body: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, INVALID_BODY);
        }
    };

    let question = request.question.as_deref().unwrap_or_default().trim();
    if question.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, EMPTY_QUESTION);
    }

    let exchange = service.ask(question).await;
    if let Some(error) = exchange.result.error() {
        tracing::warn!("Question answered with error: {}", error);
    } else {
        tracing::info!("Question answered");
    }

    (StatusCode::OK, Json(AskResponse::from(exchange))).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &format!("Server error: {detail}"),
    )
}
