use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::breed::BreedId;

/// A breed record that cannot be stored as given.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing or blank")]
    MissingField(&'static str),

    #[error("Bound '{field}' is inverted: min {min} > max {max}")]
    InvertedBound {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Field '{field}' must be positive")]
    NonPositive { field: &'static str },

    #[error("Field '{field}' is {value}, above the maximum of {max}")]
    OutOfRange {
        field: &'static str,
        value: u8,
        max: u8,
    },
}

/// Failures surfaced by the catalog store and the seeder.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Corrupt stored value: {0}")]
    Corrupt(String),

    #[error("Seed dataset could not be parsed: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("Breed {0} does not exist")]
    UnknownBreed(BreedId),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Invalid quiz transitions. These indicate a caller bug, not a user error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizStateError {
    #[error("Option '{0}' does not belong to the current question")]
    UnknownOption(String),

    #[error("No option has been selected for the current question")]
    NoPendingSelection,

    #[error("Already at the first question")]
    AtFirstQuestion,

    #[error("The quiz is already completed")]
    AlreadyCompleted,

    #[error("The quiz has not been completed yet")]
    NotCompleted,
}

/// Error type for the HTTP adapter.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizStateError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Quiz(e) => (StatusCode::CONFLICT, "QUIZ_STATE_ERROR", e.to_string()),
            AppError::Store(StoreError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Store(StoreError::UnknownBreed(id)) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Breed {id} not found"),
            ),
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "The catalog store is unavailable, please retry".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
