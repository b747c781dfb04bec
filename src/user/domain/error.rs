//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username contains unsupported characters.
    #[error("username '{0}' may only contain letters, digits and @.+-_")]
    InvalidUsername(String),

    /// The username exceeds the 150-character storage limit.
    #[error("username exceeds 150 character limit: {0}")]
    UsernameTooLong(String),

    /// The email address is empty after trimming.
    #[error("email address must not be empty")]
    EmptyEmail,

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// A required name field is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyName(&'static str),

    /// A name field exceeds the 150-character storage limit.
    #[error("{0} exceeds 150 character limit")]
    NameTooLong(&'static str),
}
