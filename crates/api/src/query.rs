//! Shared query parameter types for API handlers.

use serde::Deserialize;

use imuna_core::error::DomainError;
use imuna_core::validation::ValidationErrors;

use crate::error::AppError;

/// Query parameters for the `POST .../generate` endpoints (`?quantity=`).
#[derive(Debug, Default, Deserialize)]
pub struct GenerateParams {
    pub quantity: Option<i64>,
}

impl GenerateParams {
    /// Resolve the requested quantity, defaulting to 1.
    ///
    /// Rejects zero and negative values with a field-level validation
    /// error, matching the behaviour of the form endpoints.
    pub fn resolve_quantity(&self) -> Result<i64, AppError> {
        let quantity = self.quantity.unwrap_or(1);
        if quantity < 1 {
            let mut errors = ValidationErrors::new();
            errors.add("quantity", "The quantity must be at least 1.");
            return Err(DomainError::Validation(errors).into());
        }
        Ok(quantity)
    }
}
