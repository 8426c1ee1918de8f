use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use imuna_core::error::DomainError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`DomainError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] so every failure path produces the same
/// `{ "message": ... }` JSON envelope, with a field map added on 422.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `imuna_core`.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A request body that axum could not deserialize.
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    /// A query string that axum could not deserialize.
    #[error(transparent)]
    QueryRejection(#[from] QueryRejection),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // --- DomainError variants ---
            AppError::Domain(domain) => match domain {
                DomainError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, json!({ "message": domain.to_string() }))
                }
                DomainError::BadIdentifier(msg) => {
                    (StatusCode::BAD_REQUEST, json!({ "message": msg }))
                }
                DomainError::Validation(errors) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({ "message": "Validation failed", "errors": errors }),
                ),
                DomainError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "message": msg })),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),
            AppError::JsonRejection(rejection) => (
                rejection.status(),
                json!({ "message": rejection.body_text() }),
            ),
            AppError::QueryRejection(rejection) => (
                rejection.status(),
                json!({ "message": rejection.body_text() }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and response body.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations (23505) and foreign-key violations (23503) map
///   to 409; handlers pre-check both, so reaching here means a write
///   raced past the check.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, serde_json::Value) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            json!({ "message": "Resource not found" }),
        ),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") => (
                StatusCode::CONFLICT,
                json!({ "message": "A record with this value already exists" }),
            ),
            Some("23503") => (
                StatusCode::CONFLICT,
                json!({ "message": "The record is still referenced by another record" }),
            ),
            _ => {
                tracing::error!(error = %db_err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "An internal error occurred" }),
                )
            }
        },
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "An internal error occurred" }),
            )
        }
    }
}
