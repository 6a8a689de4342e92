use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("Reservation not found: {0}")]
    NotFound(i64),

    #[error("Room not found: {0}")]
    RoomNotFound(i64),

    #[error("Room {0} is not available")]
    RoomUnavailable(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ReservationResult<T> = Result<T, ReservationError>;

/// Convert ReservationError to AppError for standardized error responses
impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::NotFound(id) => {
                AppError::NotFound(format!("Reservation {} not found", id))
            }
            ReservationError::RoomNotFound(id) => {
                AppError::NotFound(format!("Room {} not found", id))
            }
            ReservationError::RoomUnavailable(id) => {
                AppError::BadRequest(format!("Room {} is not available", id))
            }
            ReservationError::Validation(msg) => AppError::BadRequest(msg),
            ReservationError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ReservationError {
    fn into_response(self) -> Response {
        // Convert to AppError for standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
