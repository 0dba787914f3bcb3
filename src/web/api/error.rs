use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::CatalogError;
use crate::scheduler::SchedulerError;
use crate::timeexpr::TimeExprError;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(String),
    Internal(String),
}

impl From<TimeExprError> for ApiError {
    fn from(e: TimeExprError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<SchedulerError> for ApiError {
    fn from(e: SchedulerError) -> Self {
        match e {
            SchedulerError::NotFound(name) => ApiError::NotFound(name),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(name) => ApiError::NotFound(name),
            CatalogError::Duplicate(name) => {
                ApiError::Validation(format!("duplicate object {}", name))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("validation_failed", &msg)),
            )
                .into_response(),
            ApiError::NotFound(name) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::with_message("object_not_found", &name)),
            )
                .into_response(),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_message("internal_error", &msg)),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
