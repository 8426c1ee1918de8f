//! Client-side error taxonomy.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Error type for API calls.
///
/// Non-success statuses are classified by code so callers can branch on
/// the failure kind; the server message always rides along for display.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: connection refused, timeout, bad URL.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 422 with per-field messages keyed by request field name.
    #[error("{message}")]
    Validation {
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },

    /// 404 for a missing record or unknown route.
    #[error("{0}")]
    NotFound(String),

    /// 400 for a malformed identifier or request shape.
    #[error("{0}")]
    BadRequest(String),

    /// 409 when a change collides with existing data.
    #[error("{0}")]
    Conflict(String),

    /// Any other non-success status.
    #[error("HTTP {status}: {message}")]
    Unexpected { status: StatusCode, message: String },
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Error envelope the API sends: `{"message": ..., "errors"?: {...}}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    errors: BTreeMap<String, Vec<String>>,
}

impl ClientError {
    /// Classify a non-success response from its status and raw body.
    ///
    /// The envelope is parsed when present; a body that is not the
    /// envelope is carried as plain text so no server detail is lost.
    pub(crate) fn from_response_parts(status: StatusCode, body: &[u8]) -> Self {
        let (message, errors) = match serde_json::from_slice::<ErrorBody>(body) {
            Ok(envelope) => (envelope.message, envelope.errors),
            Err(_) => (String::from_utf8_lossy(body).into_owned(), BTreeMap::new()),
        };

        match status {
            StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation { message, errors },
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::BadRequest(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            _ => ClientError::Unexpected { status, message },
        }
    }
}
