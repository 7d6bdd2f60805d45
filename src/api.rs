// src/api.rs
//! HTTP surface. Thin plumbing over the analysis core: health checks, the
//! startup-annotated views, and direct analyze/batch endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::batch::{BatchOutcome, BatchProcessor};
use crate::types::InputRecord;

const SERVICE_NAME: &str = "Tweet Threat Analyzer";
const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<BatchProcessor>,
    /// Records as loaded at startup, unannotated.
    pub raw: Arc<Vec<InputRecord>>,
    /// The startup batch run over `raw`.
    pub processed: Arc<Vec<BatchOutcome>>,
    /// False when the record source was unavailable at startup; the
    /// service keeps running with empty data and a degraded /health.
    pub source_ok: bool,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_basic))
        .route("/health", get(health_detailed))
        .route("/data", get(raw_data))
        // Route name preserved verbatim for existing consumers.
        .route("/data-proses", get(processed_data))
        .route("/analyze", post(analyze_one))
        .route("/batch", post(analyze_batch))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn health_basic() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "message": "Service is running",
    }))
}

async fn health_detailed(State(state): State<AppState>) -> Response {
    let body = json!({
        "status": if state.source_ok { "healthy" } else { "degraded" },
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "record_source": if state.source_ok { "available" } else { "unavailable" },
        "data_status": {
            "raw_records": state.raw.len(),
            "processed_records": state.processed.len(),
        },
    });

    if state.source_ok {
        (StatusCode::OK, Json(body)).into_response()
    } else {
        warn!("health check: record source unavailable");
        (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
    }
}

async fn raw_data(State(state): State<AppState>) -> Json<Vec<InputRecord>> {
    info!(count = state.raw.len(), "serving raw records");
    Json(state.raw.as_ref().clone())
}

async fn processed_data(State(state): State<AppState>) -> Json<Vec<BatchOutcome>> {
    info!(count = state.processed.len(), "serving processed records");
    Json(state.processed.as_ref().clone())
}

async fn analyze_one(State(state): State<AppState>, Json(record): Json<InputRecord>) -> Response {
    match state.processor.analyzer().analyze(&record) {
        Ok(annotated) => Json(annotated).into_response(),
        Err(error) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "id": record.id, "error": error })),
        )
            .into_response(),
    }
}

async fn analyze_batch(
    State(state): State<AppState>,
    Json(records): Json<Vec<InputRecord>>,
) -> Json<Vec<BatchOutcome>> {
    Json(state.processor.process(&records))
}
