//! HTTP routes for the progress API.

use std::sync::Arc;

use academy_core::model::{ModuleId, ModuleOverview, ModuleProgress, ProgressSummary};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use services::{ProgressService, ProgressServiceError};
use tracing::{error, warn};

/// Shared handler state. Constructed once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub progress: Arc<ProgressService>,
}

impl AppState {
    #[must_use]
    pub fn new(progress: Arc<ProgressService>) -> Self {
        Self { progress }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(progress_routes())
        .merge(catalog_routes())
        .merge(health_routes())
        .with_state(state)
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps service errors onto HTTP status codes.
pub struct ApiError(ProgressServiceError);

impl From<ProgressServiceError> for ApiError {
    fn from(err: ProgressServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ProgressServiceError::InvalidModuleId(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self.0, "progress request failed");
        } else {
            warn!(error = %self.0, "progress request rejected");
        }
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Progress Routes
// ============================================================================

fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/api/progress", get(get_all_module_progress))
        .route("/api/progress/:module_id", get(is_module_complete))
        .route("/api/progress/:module_id/complete", post(mark_module_complete))
        .route("/api/progress/:module_id/reset", post(reset_module))
}

async fn get_all_module_progress(
    State(state): State<AppState>,
) -> Result<Json<Vec<(ModuleId, bool)>>, ApiError> {
    let progress = state.progress.get_all_module_progress().await?;
    Ok(Json(progress.into_iter().map(ModuleProgress::into_pair).collect()))
}

async fn is_module_complete(
    State(state): State<AppState>,
    Path(module_id): Path<String>,
) -> Result<Json<bool>, ApiError> {
    let completed = state.progress.is_module_complete(&module_id).await?;
    Ok(Json(completed))
}

async fn mark_module_complete(
    State(state): State<AppState>,
    Path(module_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.progress.mark_module_complete(&module_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reset_module(
    State(state): State<AppState>,
    Path(module_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.progress.reset_module(&module_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Catalog Routes
// ============================================================================

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/modules", get(module_overview))
        .route("/api/summary", get(summary))
}

async fn module_overview(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModuleOverview>>, ApiError> {
    Ok(Json(state.progress.module_overview().await?))
}

async fn summary(State(state): State<AppState>) -> Result<Json<ProgressSummary>, ApiError> {
    Ok(Json(state.progress.summary().await?))
}

// ============================================================================
// Health Routes
// ============================================================================

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
