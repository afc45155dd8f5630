use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StorageError;
use crate::scheduling::RejectionReason;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Booking rejected: {0}")]
    Rejected(RejectionReason),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Storage(ref err) => match err {
                StorageError::NotFound => (StatusCode::NOT_FOUND, "Resource not found"),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred",
                ),
            },
            AppError::Authentication(_) => (StatusCode::UNAUTHORIZED, "Authentication failed"),
            AppError::Authorization(_) => (StatusCode::FORBIDDEN, "Access denied"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Resource not found"),
            AppError::Rejected(reason) => {
                // Policy failures are the client's mistake; availability
                // failures are recoverable by picking another slot.
                let status = match reason {
                    RejectionReason::PastDate | RejectionReason::TooFarFuture => {
                        StatusCode::BAD_REQUEST
                    }
                    RejectionReason::DayBlocked | RejectionReason::SlotUnavailable => {
                        StatusCode::CONFLICT
                    }
                    RejectionReason::LimitExceeded => StatusCode::TOO_MANY_REQUESTS,
                };
                let body = Json(json!({
                    "error": {
                        "message": reason.message(),
                        "reason": reason.as_code(),
                    }
                }));
                return (status, body).into_response();
            }
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "details": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
