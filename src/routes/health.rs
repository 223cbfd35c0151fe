use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Refresh tasks with a live periodic timer
    pub armed_tasks: Vec<String>,
}

/// Health check endpoint
///
/// Returns 200 OK while the process is up, whether or not the weather
/// station is currently reachable.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        armed_tasks: state
            .scheduler
            .armed()
            .into_iter()
            .map(|kind| kind.name().to_string())
            .collect(),
    })
}
