use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use moodline_core::error::CoreError;
use moodline_instruments::error::{ValidationError, ValidationIssue};
use moodline_storage::StorageError;
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Invalid(ValidationError),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    issues: Option<Vec<ValidationIssue>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, issues) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Invalid(e) => (StatusCode::BAD_REQUEST, e.to_string(), Some(e.issues)),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorBody { error, issues })).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Invalid(e)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { .. } => ApiError::NotFound("submission not found".to_string()),
            StorageError::Core(CoreError::InvalidUserId(msg)) => {
                ApiError::BadRequest(format!("invalid user id: {msg}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<moodline_export::error::ExportError> for ApiError {
    fn from(e: moodline_export::error::ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
