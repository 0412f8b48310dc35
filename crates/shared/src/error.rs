//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Module errors in `hearth-core` convert into this type at the edge of the
/// system, where callers only need a category, a code, and a message.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error (caller supplied an invalid argument).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Business rule violation (e.g. an invalid lifecycle transition).
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Conflict (e.g. concurrent modification of the same entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Persistence gateway error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error, including ledger invariant violations.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::BusinessRule(_) => 422,
            Self::Configuration(_) | Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
