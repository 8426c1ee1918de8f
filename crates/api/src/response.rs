//! Shared response types for API handlers.

use serde::Serialize;

/// Standard `{ "message": ... }` payload for deletes and notices.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
