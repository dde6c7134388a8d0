//! Conversion of module errors into HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use expensebook_core::category::CategoryError;
use expensebook_core::source::SourceError;
use expensebook_core::view::ViewError;
use expensebook_shared::AppError;

/// Handler error rendered as `{"error", "message"}` JSON.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(json!({
                "error": self.0.error_code().to_ascii_lowercase(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ViewError> for ApiError {
    fn from(err: ViewError) -> Self {
        let message = err.to_string();
        Self(match err {
            ViewError::MissingDate | ViewError::MissingMonth => AppError::MissingInput(message),
            ViewError::UnknownCategory(_) => AppError::NotFound(message),
            ViewError::UnknownMode(_) | ViewError::SentinelCategory(_) => {
                AppError::Validation(message)
            }
        })
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        let message = err.to_string();
        Self(match err {
            CategoryError::NotFound(_) => AppError::NotFound(message),
            CategoryError::Duplicate(_) => AppError::Conflict(message),
            CategoryError::EmptyName | CategoryError::Reserved(_) => AppError::Validation(message),
        })
    }
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Category(err) => err.into(),
            SourceError::Status { status: 404, message } => Self(AppError::NotFound(message)),
            SourceError::Status { status: 409, message } => Self(AppError::Conflict(message)),
            SourceError::Status { status: 400, message } => Self(AppError::Validation(message)),
            other => {
                error!(error = %other, "Expense backend failed");
                Self(AppError::ExternalService(other.to_string()))
            }
        }
    }
}
