use axum::extract::{Multipart, State, multipart::MultipartRejection};
use platewise_core::domain::menu_scan::{
    entities::MenuAnalysisResult, ports::MenuScanService, value_objects::ScanMenuInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        menu_scan::validators::read_image_upload,
        server::{
            api_entities::{
                api_error::{ApiError, ApiErrorResponse},
                response::Response,
            },
            app_state::{AppServices, AppState},
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ScanMenuResponse {
    pub success: bool,
    pub data: MenuAnalysisResult,
}

#[utoipa::path(
    post,
    path = "/scan",
    tag = "menu",
    summary = "Scan a menu photo",
    description = "Classifies every item on a menu photo as SAFE, CAUTION or AVOID for the caller's health profile. Send the photo as the multipart field `image` (JPEG, PNG or WebP, at most 20 MiB).",
    request_body(content_type = "multipart/form-data", description = "Form with an `image` file field"),
    responses(
        (status = 200, body = ScanMenuResponse),
        (status = 400, body = ApiErrorResponse, description = "Missing or invalid image"),
        (status = 401, body = ApiErrorResponse, description = "No valid session"),
        (status = 404, body = ApiErrorResponse, description = "User record not found"),
        (status = 500, body = ApiErrorResponse, description = "Model call or response validation failed"),
    ),
    security(("bearer" = []), ("session_cookie" = []))
)]
pub async fn scan_menu<S: AppServices>(
    State(state): State<AppState<S>>,
    RequiredIdentity(identity): RequiredIdentity,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<ScanMenuResponse>, ApiError> {
    let multipart = multipart.map_err(|_| ApiError::MissingImage)?;
    let upload = read_image_upload(multipart).await?;

    let result = state
        .service
        .scan_menu(
            Some(identity),
            ScanMenuInput {
                image_data: upload.data,
                mime_type: upload.mime_type,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ScanMenuResponse {
        success: true,
        data: result,
    }))
}
