use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::response::Response;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct LivenessResponse {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    summary = "Liveness check",
    responses((status = 200, body = LivenessResponse))
)]
pub async fn health_live() -> Response<LivenessResponse> {
    Response::OK(LivenessResponse {
        status: "ok".to_string(),
    })
}
