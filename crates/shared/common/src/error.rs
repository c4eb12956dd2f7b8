//! Unified application error handling.
//!
//! Wraps [`DomainError`] unchanged and adds the failures of the collaborators
//! around the domain (storage lookups, event dispatch). Provides stable error
//! codes and messages that are safe to show to a client.

use domain::{DomainError, UserStatus};
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown account or a credential that was not accepted.
    /// Deliberately does not say which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Credential accepted, but the account may not log in
    #[error("Account is {0}")]
    AccountInactive(UserStatus),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    // Domain rule violations, passed through verbatim
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Event dispatch
    #[error("Event publishing failed: {0}")]
    Publish(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::AccountInactive(_) => "ACCOUNT_INACTIVE",
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Domain(e) if e.is_credential_failure() => "INVALID_CREDENTIALS",
            AppError::Domain(e) => e.code(),
            AppError::Publish(_) => "PUBLISH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Conflict(msg) => format!("{} already exists", msg),

            // Never explain why a credential was rejected
            AppError::Domain(e) if e.is_credential_failure() => {
                AppError::InvalidCredentials.to_string()
            }

            // A corrupted stored hash is a data problem, not a wrong password
            AppError::Domain(e @ (DomainError::InvalidHashFormat
            | DomainError::UnsupportedHashAlgorithm(_)
            | DomainError::Hashing(_))) => {
                tracing::error!("Credential error: {}", e);
                "An internal error occurred".to_string()
            }
            AppError::Domain(e) => e.to_string(),

            // Hide details for internal errors
            AppError::Publish(msg) => {
                tracing::error!("Publish error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }

    /// Whether the caller can fix the request and retry
    pub fn is_client_error(&self) -> bool {
        match self {
            AppError::InvalidCredentials
            | AppError::AccountInactive(_)
            | AppError::NotFound
            | AppError::Conflict(_) => true,
            AppError::Domain(e) => {
                e.is_validation() || e.is_credential_failure() || *e == DomainError::UserDeleted
            }
            AppError::Publish(_) | AppError::Internal(_) => false,
        }
    }

    /// The wrapped domain error, if any
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            AppError::Domain(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn publish(msg: impl Into<String>) -> Self {
        AppError::Publish(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
