//! Domain-level errors.
//!
//! Every validation and state-machine failure has its own variant so callers
//! can match on the kind. They are independent of infrastructure concerns
//! (HTTP, gRPC, database).

use thiserror::Error;

use crate::constants::{
    MAX_BIO_LENGTH, MAX_DISPLAY_NAME_LENGTH, MAX_EMAIL_LENGTH, MAX_PASSWORD_LENGTH,
    MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
};

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    // Email
    #[error("Email is required")]
    EmailEmpty,

    #[error("Email format is invalid")]
    EmailInvalid,

    #[error("Email must be at most {} characters", MAX_EMAIL_LENGTH)]
    EmailTooLong,

    #[error("Disposable email addresses are not allowed")]
    EmailDisposable,

    // Username
    #[error("Username is required")]
    UsernameEmpty,

    #[error("Username must be at least {} characters", MIN_USERNAME_LENGTH)]
    UsernameTooShort,

    #[error("Username must be at most {} characters", MAX_USERNAME_LENGTH)]
    UsernameTooLong,

    #[error("Username may only contain letters, digits and underscores")]
    UsernameInvalid,

    #[error("Username is reserved")]
    UsernameReserved,

    // Password policy
    #[error("Password is required")]
    PasswordEmpty,

    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,

    #[error("Password must be at most {} characters", MAX_PASSWORD_LENGTH)]
    PasswordTooLong,

    #[error("Password is too common")]
    PasswordWeak,

    // Credential verification
    #[error("Password does not match")]
    PasswordMismatch,

    #[error("Password hash is empty")]
    PasswordHashEmpty,

    #[error("Password hash has an invalid format")]
    InvalidHashFormat,

    #[error("Unsupported password hash algorithm: {0}")]
    UnsupportedHashAlgorithm(String),

    /// The key-derivation function itself failed
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    // Identity
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid user status: {0}")]
    InvalidStatus(String),

    // Profile
    #[error("Display name must be at most {} characters", MAX_DISPLAY_NAME_LENGTH)]
    DisplayNameTooLong,

    #[error("Bio must be at most {} characters", MAX_BIO_LENGTH)]
    BioTooLong,

    // Lifecycle
    #[error("User has been deleted")]
    UserDeleted,
}

impl DomainError {
    /// Stable machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::EmailEmpty => "EMAIL_EMPTY",
            DomainError::EmailInvalid => "EMAIL_INVALID",
            DomainError::EmailTooLong => "EMAIL_TOO_LONG",
            DomainError::EmailDisposable => "EMAIL_DISPOSABLE",
            DomainError::UsernameEmpty => "USERNAME_EMPTY",
            DomainError::UsernameTooShort => "USERNAME_TOO_SHORT",
            DomainError::UsernameTooLong => "USERNAME_TOO_LONG",
            DomainError::UsernameInvalid => "USERNAME_INVALID",
            DomainError::UsernameReserved => "USERNAME_RESERVED",
            DomainError::PasswordEmpty => "PASSWORD_EMPTY",
            DomainError::PasswordTooShort => "PASSWORD_TOO_SHORT",
            DomainError::PasswordTooLong => "PASSWORD_TOO_LONG",
            DomainError::PasswordWeak => "PASSWORD_WEAK",
            DomainError::PasswordMismatch => "PASSWORD_MISMATCH",
            DomainError::PasswordHashEmpty => "PASSWORD_HASH_EMPTY",
            DomainError::InvalidHashFormat => "INVALID_HASH_FORMAT",
            DomainError::UnsupportedHashAlgorithm(_) => "UNSUPPORTED_HASH_ALGORITHM",
            DomainError::Hashing(_) => "HASHING_FAILED",
            DomainError::InvalidUserId(_) => "INVALID_USER_ID",
            DomainError::InvalidRole(_) => "INVALID_ROLE",
            DomainError::InvalidStatus(_) => "INVALID_STATUS",
            DomainError::DisplayNameTooLong => "DISPLAY_NAME_TOO_LONG",
            DomainError::BioTooLong => "BIO_TOO_LONG",
            DomainError::UserDeleted => "USER_DELETED",
        }
    }

    /// Errors caused by caller input that can be shown back to the client
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            DomainError::PasswordMismatch
                | DomainError::PasswordHashEmpty
                | DomainError::InvalidHashFormat
                | DomainError::UnsupportedHashAlgorithm(_)
                | DomainError::Hashing(_)
                | DomainError::UserDeleted
        )
    }

    /// Errors produced while checking a credential.
    ///
    /// These must never reveal more than "the credential was not accepted".
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            DomainError::PasswordMismatch | DomainError::PasswordHashEmpty
        )
    }

    /// A stored hash could not be decoded; this is data corruption, not a wrong password
    pub fn is_corrupted_hash(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidHashFormat | DomainError::UnsupportedHashAlgorithm(_)
        )
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
