use axum::extract::State;
use platewise_core::domain::health::{entities::DatabaseHealthStatus, ports::HealthCheckService};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::{AppServices, AppState},
};

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness check",
    description = "Pings the database and reports the round-trip latency.",
    responses(
        (status = 200, body = DatabaseHealthStatus),
        (status = 503, body = ApiErrorResponse),
    )
)]
pub async fn health_ready<S: AppServices>(
    State(state): State<AppState<S>>,
) -> Result<Response<DatabaseHealthStatus>, ApiError> {
    let status = state.service.readiness().await.map_err(|e| {
        tracing::warn!("Readiness check failed: {}", e);
        ApiError::ServiceUnavailable("Database is unreachable".to_string())
    })?;

    if !status.healthy {
        return Err(ApiError::ServiceUnavailable(
            "Database is unreachable".to_string(),
        ));
    }

    Ok(Response::OK(status))
}
