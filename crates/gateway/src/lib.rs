//! HTTP gateway for deskrail.
//!
//! Exposes the support pipeline over four endpoints:
//!
//! - `GET  /health`      liveness and version
//! - `POST /chat`        one full pipeline pass for a session
//! - `POST /ingest`      ingest documents from the request body
//! - `POST /ingest-path` ingest `.md`/`.txt` files from the document root
//!
//! Built on Axum. Router construction is separated from serving so
//! tests drive the router directly with tower's `oneshot`.

pub mod ingest;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use deskrail_agent::SessionRegistry;
use deskrail_config::AppConfig;
use deskrail_core::{Error, EscalationReason, Result, SessionId};

use ingest::{collect_documents, IngestError};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub registry: Arc<SessionRegistry>,
    pub docs_root: PathBuf,
    pub latency_budget: Duration,
}

type SharedState = Arc<GatewayState>;

impl GatewayState {
    /// Build the registry and gateway settings from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            registry: Arc::new(SessionRegistry::from_config(config)?),
            docs_root: PathBuf::from(&config.gateway.docs_dir),
            latency_budget: Duration::from_millis(config.gateway.latency_budget_ms),
        })
    }
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/ingest", post(ingest_handler))
        .route("/ingest-path", post(ingest_path_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server and block until it exits.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let state = Arc::new(GatewayState::from_config(config)?);
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("failed to bind {addr}: {e}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("server error: {e}")))?;

    Ok(())
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Deserialize)]
struct ChatRequest {
    /// The user's message.
    message: String,
    /// Existing session id (omit to start a new session).
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct ChatResponse {
    response: String,
    escalated: bool,
    escalation_reason: Option<EscalationReason>,
    confidence: f32,
    session_id: String,
}

#[derive(Deserialize)]
struct IngestRequest {
    documents: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct IngestResponse {
    ingested: usize,
}

#[derive(Deserialize)]
struct IngestPathRequest {
    /// Path relative to the document root (defaults to the root).
    #[serde(default)]
    path: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct IngestPathResponse {
    ingested: usize,
    files: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> std::result::Result<Json<ChatResponse>, HandlerError> {
    if payload.message.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "message must not be empty",
        ));
    }

    let session_id = payload
        .session_id
        .map(SessionId::from)
        .unwrap_or_default();

    info!(session = %session_id, "chat request");

    let result = tokio::time::timeout(
        state.latency_budget,
        state.registry.handle(&session_id, &payload.message),
    )
    .await
    .map_err(|_| {
        warn!(session = %session_id, "latency budget exceeded");
        error_response(StatusCode::GATEWAY_TIMEOUT, "latency budget exceeded")
    })?
    .map_err(|e| {
        warn!(session = %session_id, error = %e, "pipeline failed");
        error_response(StatusCode::BAD_GATEWAY, e.to_string())
    })?;

    Ok(Json(ChatResponse {
        response: result.response,
        escalated: result.escalated,
        escalation_reason: result.escalation_reason,
        confidence: result.confidence,
        session_id: session_id.to_string(),
    }))
}

async fn ingest_handler(
    State(state): State<SharedState>,
    Json(payload): Json<IngestRequest>,
) -> std::result::Result<Json<IngestResponse>, HandlerError> {
    let count = payload.documents.len();

    state
        .registry
        .store()
        .add(payload.documents)
        .await
        .map_err(|e| error_response(StatusCode::BAD_GATEWAY, e.to_string()))?;

    info!(count, "documents ingested");
    Ok(Json(IngestResponse { ingested: count }))
}

async fn ingest_path_handler(
    State(state): State<SharedState>,
    Json(payload): Json<IngestPathRequest>,
) -> std::result::Result<Json<IngestPathResponse>, HandlerError> {
    let collected =
        collect_documents(&state.docs_root, payload.path.as_deref()).map_err(|e| {
            let status = match &e {
                IngestError::NotFound => StatusCode::NOT_FOUND,
                IngestError::OutsideRoot => StatusCode::BAD_REQUEST,
                IngestError::ReadFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error_response(status, e.to_string())
        })?;

    let count = collected.documents.len();
    state
        .registry
        .store()
        .add(collected.documents)
        .await
        .map_err(|e| error_response(StatusCode::BAD_GATEWAY, e.to_string()))?;

    info!(count, "documents ingested from path");
    Ok(Json(IngestPathResponse {
        ingested: count,
        files: collected.files,
    }))
}
