//! HTTP command surface using Axum

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::error::ShellError;
use crate::jobs::shell::JobShell;
use crate::metrics::Metrics;

pub const SERVICE_NAME: &str = "candlewatch";

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub shell: Arc<JobShell>,
}

impl AppState {
    pub fn new(shell: Arc<JobShell>, metrics: Arc<Metrics>) -> Self {
        Self {
            metrics,
            start_time: Arc::new(Instant::now()),
            shell,
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Body of `POST /api/commands/{command}`
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandRequest {
    pub owner_id: i64,
    #[serde(default)]
    pub chat_id: Option<i64>,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub message: String,
}

impl IntoResponse for ShellError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.message() })),
        )
            .into_response()
    }
}

async fn run_command(
    State(state): State<AppState>,
    Path(command): Path<String>,
    Json(request): Json<CommandRequest>,
) -> Result<Response, ShellError> {
    let shell = &state.shell;
    let owner_id = request.owner_id;
    let message = match command.as_str() {
        "add" => {
            let chat_id = request.chat_id.unwrap_or(owner_id);
            shell.add(&request.args, owner_id, chat_id).await?
        }
        "remove" => shell.remove(&request.args, owner_id).await?,
        "list" => shell.list(&request.args, owner_id).await?,
        _ => {
            return Ok((
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("unknown command: {}", command) })),
            )
                .into_response())
        }
    };

    Ok(Json(CommandResponse { message }).into_response())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/commands/{command}", post(run_command))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
