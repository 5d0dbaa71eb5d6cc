use axum::{Router, extract::DefaultBodyLimit, middleware, routing::post};
use platewise_core::domain::menu_scan::value_objects::MAX_IMAGE_BYTES;
use utoipa::OpenApi;

use super::{
    handlers::scan_menu::{__path_scan_menu, scan_menu},
    validators::MULTIPART_OVERHEAD_BYTES,
};
use crate::application::{
    auth::auth,
    http::server::app_state::{AppServices, AppState},
};

#[derive(OpenApi)]
#[openapi(paths(scan_menu))]
pub struct MenuScanApiDoc;

pub fn menu_scan_routes<S: AppServices>(state: AppState<S>) -> Router<AppState<S>> {
    Router::new()
        .route(
            &format!("{}/api/menu/scan", state.args.server.root_path),
            post(scan_menu::<S>),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + MULTIPART_OVERHEAD_BYTES))
        .layer(middleware::from_fn_with_state(state.clone(), auth::<S>))
}
