use std::sync::Arc;

use axum::Router;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use platewise_core::{
    application::{PlatewiseService, create_service},
    domain::common::PlatewiseConfig,
};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use super::app_state::{AppServices, AppState};
use super::config::get_config;
use super::openapi::ApiDoc;
use crate::application::http::{
    health::router::health_routes, menu_scan::router::menu_scan_routes,
    profile::router::profile_routes,
};
use crate::args::Args;

pub async fn state(args: Arc<Args>) -> Result<AppState<PlatewiseService>, anyhow::Error> {
    let platewise_config = PlatewiseConfig::from(args.as_ref().clone());
    let service = create_service(platewise_config).await?;

    Ok(AppState::new(args, service))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allowed_origins = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid allowed origin: {}", origin);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, CONTENT_LENGTH, ACCEPT])
        .allow_credentials(true)
}

///  Returns the [`Router`] of this application.
pub fn router<S: AppServices>(state: AppState<S>) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let cors = cors_layer(&state.args.server.allowed_origins);

    let root_path = state.args.server.root_path.clone();

    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", root_path), item))
        .collect();
    openapi.paths = paths;

    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    let router = Router::new()
        .merge(Scalar::with_url(
            format!("{}/scalar", root_path),
            openapi.clone(),
        ))
        .merge(
            SwaggerUi::new(format!("{}/swagger-ui", root_path))
                .url(api_docs_url.clone(), openapi.clone()),
        )
        .merge(Redoc::with_url(format!("{}/redoc", root_path), openapi))
        .merge(RapiDoc::new(api_docs_url).path(format!("{}/rapidoc", root_path)))
        .route(&format!("{}/config", root_path), get(get_config::<S>))
        .merge(menu_scan_routes(state.clone()))
        .merge(profile_routes(state.clone()))
        .merge(health_routes::<S>(&root_path));

    let router = if state.args.server.metrics_enabled {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router
            .route(
                &format!("{}/metrics", root_path),
                get(|| async move { metric_handle.render() }),
            )
            .layer(prometheus_layer)
    } else {
        router
    };

    Ok(router.layer(trace_layer).layer(cors).with_state(state))
}
