//! GET /health — reachability of the configured model backends.

use std::sync::Arc;

use axum::{Json, extract::State};
use llm_service::health_service::HealthStatus;
use tracing::error;

use crate::core::app_state::AppState;

/// Handler: GET /health
///
/// Probes each distinct model profile and reports the outcome. Probe
/// failures are statuses, not errors, so this endpoint itself never fails.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Vec<HealthStatus>> {
    match state.profiles.health_all().await {
        Ok(statuses) => Json(statuses),
        Err(e) => {
            error!(target: "api::health", error = %e, "health check failed");
            Json(Vec::new())
        }
    }
}
