//! HTTP request handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use tracing::error;

use crate::application::pipeline::ClonePipeline;
use crate::config::Config;
use crate::presentation::models::{CloneRequest, CloneResponse, ErrorResponse, HealthResponse};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ClonePipeline>,
    pub config: Arc<Config>,
}

/// POST /clone - Clone a website
#[utoipa::path(
    post,
    path = "/clone",
    request_body = CloneRequest,
    responses(
        (status = 200, description = "Clone completed", body = CloneResponse),
        (status = 400, description = "Generated project failed validation", body = ErrorResponse),
        (status = 500, description = "Pipeline failure", body = ErrorResponse)
    ),
    tag = "clone"
)]
pub async fn clone_website(
    State(state): State<AppState>,
    Json(request): Json<CloneRequest>,
) -> Result<Json<CloneResponse>, (StatusCode, Json<ErrorResponse>)> {
    let url = request.url.clone();
    match state.pipeline.execute(request.into_command()).await {
        Ok(outcome) => Ok(Json(outcome.into())),
        Err(e) => {
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error!(url = %url, error = %e, "clone request failed");
            Err((
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

/// GET /health - Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET / - Service metadata
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "reweave",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Reconstructs a website's front-end from a live URL",
        "endpoints": {
            "clone": "POST /clone",
            "health": "GET /health",
            "docs": "/docs"
        }
    }))
}
