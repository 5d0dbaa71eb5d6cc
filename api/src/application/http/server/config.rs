use axum::extract::State;
use platewise_core::domain::menu_scan::{
    ImageMimeType, prompt::MENU_ANALYSIS_INSTRUCTION_VERSION, value_objects::MAX_IMAGE_BYTES,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    api_entities::response::Response,
    app_state::{AppServices, AppState},
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ClientConfig {
    pub max_image_bytes: usize,
    pub accepted_image_types: Vec<String>,
    pub instruction_version: String,
    pub model: String,
}

/// Public limits a client needs before uploading a menu photo.
pub async fn get_config<S: AppServices>(State(state): State<AppState<S>>) -> Response<ClientConfig> {
    Response::OK(ClientConfig {
        max_image_bytes: MAX_IMAGE_BYTES,
        accepted_image_types: ImageMimeType::SUPPORTED
            .iter()
            .map(|mime| mime.as_str().to_string())
            .collect(),
        instruction_version: MENU_ANALYSIS_INSTRUCTION_VERSION.to_string(),
        model: state.args.llm.gemini_model.clone(),
    })
}
