//! Error types for the MCN server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field-level validation errors, keyed by input field name.
///
/// Serialized as `{"errors": {"field": ["message", ...]}}` with a 422 status,
/// matching the wire format the SPA expects.
#[derive(Debug, Clone, Default, Serialize, utoipa::ToSchema)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field shorthand
    pub fn one(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return `Err(AppError::Validation)` if any error was recorded
    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        /// Current entity state, so the caller can explain the refusal
        statut: Option<String>,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Conflict without an entity-state payload
    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict {
            message: message.into(),
            statut: None,
        }
    }
}

/// Error response body for 404/409/4xx/5xx errors
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statut: Option<String>,
}

/// Error response body for 422 validation errors
#[derive(Serialize, utoipa::ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: FieldErrors,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse { errors }),
            )
                .into_response(),
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    message,
                    statut: None,
                }),
            )
                .into_response(),
            AppError::Conflict { message, statut } => (
                StatusCode::CONFLICT,
                Json(ErrorResponse { message, statut }),
            )
                .into_response(),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message,
                    statut: None,
                }),
            )
                .into_response(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        message: "Database error".to_string(),
                        statut: None,
                    }),
                )
                    .into_response()
            }
            AppError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        message: "Internal server error".to_string(),
                        statut: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// True when the error is a Postgres undefined_table (SQLSTATE 42P01).
///
/// The calendar resolver treats a missing backing table as "no closures /
/// multiplier 1.0" so the booking flow survives out-of-order migrations.
pub fn is_undefined_table(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("42P01"))
}

/// True when the error is a Postgres unique_violation (SQLSTATE 23505)
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
