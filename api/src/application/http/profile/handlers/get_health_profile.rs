use axum::extract::State;
use platewise_core::domain::health_profile::{
    ports::HealthProfileService, value_objects::HealthProfileView,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::{AppServices, AppState},
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HealthProfileResponse {
    pub success: bool,
    pub data: HealthProfileView,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "profile",
    summary = "Get the caller's health profile",
    description = "Returns the profile a menu scan would use, including derived nutrient limits. `degraded` is true when stored health data could not be fully read; `issues` lists what was skipped.",
    responses(
        (status = 200, body = HealthProfileResponse),
        (status = 401, body = ApiErrorResponse),
        (status = 404, body = ApiErrorResponse),
    ),
    security(("bearer" = []), ("session_cookie" = []))
)]
pub async fn get_health_profile<S: AppServices>(
    State(state): State<AppState<S>>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<HealthProfileResponse>, ApiError> {
    let view = state
        .service
        .get_health_profile(identity)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(HealthProfileResponse {
        success: true,
        data: view,
    }))
}
