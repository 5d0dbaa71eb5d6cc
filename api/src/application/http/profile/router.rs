use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::get_health_profile::{__path_get_health_profile, get_health_profile};
use crate::application::{
    auth::auth,
    http::server::app_state::{AppServices, AppState},
};

#[derive(OpenApi)]
#[openapi(paths(get_health_profile))]
pub struct ProfileApiDoc;

pub fn profile_routes<S: AppServices>(state: AppState<S>) -> Router<AppState<S>> {
    Router::new()
        .route(
            &format!("{}/api/profile/health", state.args.server.root_path),
            get(get_health_profile::<S>),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth::<S>))
}
