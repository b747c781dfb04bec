//! Error types for conversation domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating conversations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatDomainError {
    /// A conversation needs at least one participant.
    #[error("a conversation requires at least one participant")]
    NoParticipants,

    /// Removing the participant would leave the conversation empty.
    #[error("cannot remove the last participant")]
    LastParticipant,

    /// The title exceeds the 255-character storage limit.
    #[error("conversation title exceeds 255 character limit")]
    TitleTooLong,

    /// The message body is empty after trimming.
    #[error("message body must not be empty")]
    EmptyBody,
}

/// Error returned while parsing chat message types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown chat message type: {0}")]
pub struct ParseChatMessageTypeError(pub String);
