// Copyright 2026 Flecta Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST API for flecta.
//!
//! One thin route over the resolution pipeline plus a health probe. CORS is
//! wide open — the service fronts a browser UI on another origin.

use crate::pipeline::{Pipeline, Resolution};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Request body for `POST /conjugate`. A missing `verb` field behaves like
/// an empty verb.
#[derive(Debug, Deserialize)]
pub struct ConjugationRequest {
    verb: Option<String>,
}

/// Shared state passed to handlers.
pub struct AppState {
    pub pipeline: Pipeline,
    pub started_at: Instant,
    /// Verb count of the loaded lexicon, for the health probe.
    pub lexicon_verbs: usize,
}

/// Error taxonomy surfaced over HTTP.
///
/// Backend and fetch failures never reach here — the adapters absorb them —
/// so `Internal` only fires on genuinely unexpected faults (e.g. a panicked
/// resolution task).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Please enter a verb.")]
    InvalidInput,
    #[error("Verb '{verb}' not found.")]
    NotFound { verb: String },
    #[error("Server error processing verb.")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref cause) = self {
            // Log the detail, leak only the generic message.
            error!("internal error: {cause:#}");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

/// Build the axum Router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/conjugate", post(conjugate))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn start(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("flecta listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.started_at.elapsed().as_secs_f64(),
        "lexicon_verbs": state.lexicon_verbs,
    }))
}

/// `POST /conjugate` with body `{"verb": "<string>"}`.
///
/// The resolution runs in a spawned task so a panic surfaces as a 500
/// instead of tearing down the connection.
async fn conjugate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConjugationRequest>,
) -> Result<Json<Value>, ApiError> {
    let raw = request.verb.unwrap_or_default();
    let verb = state
        .pipeline
        .normalize_verb(&raw)
        .ok_or(ApiError::InvalidInput)?;

    let pipeline = state.pipeline.clone();
    let lookup = verb.clone();
    let resolution = tokio::task::spawn(async move { pipeline.resolve(&lookup).await })
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("resolution task failed: {e}")))?;

    match resolution {
        Resolution::Success(results) => Ok(Json(serde_json::json!({ "results": results }))),
        Resolution::NotFound => Err(ApiError::NotFound { verb }),
    }
}
