//! Error types for direct-message domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating messaging domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageDomainError {
    /// The message content is empty after trimming.
    #[error("message content must not be empty")]
    EmptyContent,

    /// A notification was created without any text.
    #[error("notification content must not be empty")]
    EmptyNotificationContent,
}

/// Error returned while parsing notification types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown notification type: {0}")]
pub struct ParseNotificationTypeError(pub String);
