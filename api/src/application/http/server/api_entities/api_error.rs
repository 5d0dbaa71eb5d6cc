use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use platewise_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("No image was provided. Send the menu photo in the 'image' form field")]
    MissingImage,

    #[error("{0}")]
    InvalidImage(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AnalysisFailed(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    InternalServerError(String),
}

/// Body of every failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingImage | ApiError::InvalidImage(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::AnalysisFailed(_) | ApiError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short, stable label clients can branch on.
    pub fn label(&self) -> &'static str {
        match self {
            ApiError::MissingImage => "Missing image",
            ApiError::InvalidImage(_) => "Invalid image",
            ApiError::BadRequest(_) => "Bad request",
            ApiError::Unauthorized => "Unauthorized",
            ApiError::NotFound(_) => "Not found",
            ApiError::AnalysisFailed(_) => "Failed to analyze menu",
            ApiError::ServiceUnavailable(_) => "Service unavailable",
            ApiError::InternalServerError(_) => "Internal server error",
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidInput(message) => ApiError::InvalidImage(message),
            CoreError::Unauthenticated => ApiError::Unauthorized,
            CoreError::NotFound => ApiError::NotFound("User not found".to_string()),
            CoreError::UpstreamError(message) => ApiError::AnalysisFailed(message),
            CoreError::InternalServerError => {
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        }

        let body = ApiErrorResponse {
            success: false,
            error: self.label().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
