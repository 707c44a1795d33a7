use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User not found")]
    UserNotFound,
    #[error("Membership tier not found")]
    TierNotFound,
    #[error("Membership tier is not active")]
    TierInactive,
    #[error("Class schedule not found")]
    ScheduleNotFound,
    #[error("Gym class not found")]
    ClassNotFound,
    #[error("Booking not found or does not belong to user")]
    BookingNotFound,
    #[error("Booking is already cancelled")]
    BookingAlreadyCancelled,
    #[error("User already has a confirmed booking for this class")]
    DuplicateBooking,
    #[error("Trainer not found")]
    TrainerNotFound,
    #[error("Trainer is not available")]
    TrainerUnavailable,
    #[error("Session not found or does not belong to user")]
    SessionNotFound,
    #[error("Trainer already has a session in this time slot")]
    SessionOverlap,
    #[error("End time must be after start time")]
    InvalidTimeRange,
    #[error("Invalid time, expected a zero-padded HH:MM string")]
    InvalidTimeFormat,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServiceError::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),
            ServiceError::TierNotFound => (StatusCode::NOT_FOUND, "Membership tier not found"),
            ServiceError::TierInactive => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Membership tier is not active")
            }
            ServiceError::ScheduleNotFound => (StatusCode::NOT_FOUND, "Class schedule not found"),
            ServiceError::ClassNotFound => (StatusCode::NOT_FOUND, "Gym class not found"),
            ServiceError::BookingNotFound => (StatusCode::NOT_FOUND, "Booking not found"),
            ServiceError::BookingAlreadyCancelled => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Booking is already cancelled")
            }
            ServiceError::DuplicateBooking => {
                (StatusCode::CONFLICT, "Already booked for this class")
            }
            ServiceError::TrainerNotFound => (StatusCode::NOT_FOUND, "Trainer not found"),
            ServiceError::TrainerUnavailable => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Trainer is not available")
            }
            ServiceError::SessionNotFound => (StatusCode::NOT_FOUND, "Session not found"),
            ServiceError::SessionOverlap => {
                (StatusCode::CONFLICT, "Time slot conflicts with an existing session")
            }
            ServiceError::InvalidTimeRange => (StatusCode::BAD_REQUEST, "Invalid time range"),
            ServiceError::InvalidTimeFormat => (StatusCode::BAD_REQUEST, "Invalid time format"),
            ServiceError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
