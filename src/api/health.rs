//! The `/actuator/health` endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::app::AppState;
use crate::domain::HealthResponse;

/// Reports `UP` with 200 when the database answers, `DOWN` with 503
/// otherwise.
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.health_probe.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::up())),
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::down(e.to_string())),
            )
        }
    }
}
