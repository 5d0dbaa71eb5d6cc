use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    health_live::{__path_health_live, health_live},
    health_ready::{__path_health_ready, health_ready},
};
use crate::application::http::server::app_state::{AppServices, AppState};

#[derive(OpenApi)]
#[openapi(paths(health_live, health_ready))]
pub struct HealthApiDoc;

pub fn health_routes<S: AppServices>(root_path: &str) -> Router<AppState<S>> {
    Router::new()
        .route(&format!("{}/health/live", root_path), get(health_live))
        .route(&format!("{}/health/ready", root_path), get(health_ready::<S>))
}
