use crate::validation::ValidationErrors;

/// Domain-level failures shared by the repository and HTTP layers.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// No row matched the lookup. `entity` is the display name ("Employee").
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// A lookup segment that is neither a numeric id nor an 11-digit CPF.
    /// Carries the complete human-readable message.
    #[error("{0}")]
    BadIdentifier(String),

    /// One or more request fields failed validation.
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// The operation collides with existing data (duplicate or referenced
    /// rows). Carries the complete human-readable message.
    #[error("{0}")]
    Conflict(String),
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation(errors)
    }
}
