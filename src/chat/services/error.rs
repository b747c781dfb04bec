//! Service-level errors for conversations and chat messages.

use crate::chat::domain::{ChatDomainError, ChatMessageId, ConversationId};
use crate::error::ErrorKind;
use crate::store::StoreError;
use crate::user::domain::UserId;
use thiserror::Error;

/// Errors returned by the chat services.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ChatDomainError),
    /// Some requested participants do not exist.
    #[error("invalid user IDs: {}", join_ids(.0))]
    InvalidParticipants(Vec<UserId>),
    /// The addressed conversation does not exist.
    #[error("conversation {0} not found")]
    ConversationNotFound(ConversationId),
    /// The addressed chat message does not exist.
    #[error("chat message {0} not found")]
    MessageNotFound(ChatMessageId),
    /// The addressed user does not exist.
    #[error("user {0} not found")]
    UserNotFound(UserId),
    /// The user is not part of the conversation.
    #[error("user {user} is not a participant in conversation {conversation_id}")]
    NotParticipant {
        /// Conversation the caller acted on.
        conversation_id: ConversationId,
        /// The caller.
        user: UserId,
    },
    /// Only the author may change or delete a chat message.
    #[error("user {user} did not send chat message {message_id}")]
    NotAuthor {
        /// Message the caller tried to change.
        message_id: ChatMessageId,
        /// The caller.
        user: UserId,
    },
    /// Authors cannot mark their own messages as read.
    #[error("cannot mark own chat message {0} as read")]
    OwnMessage(ChatMessageId),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ChatError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::InvalidParticipants(_) | Self::OwnMessage(_) => {
                ErrorKind::InvalidInput
            }
            Self::ConversationNotFound(_) | Self::MessageNotFound(_) | Self::UserNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::NotParticipant { .. } | Self::NotAuthor { .. } => ErrorKind::Forbidden,
            Self::Store(err) => err.kind(),
        }
    }
}

/// Result type for chat service operations.
pub type ChatResult<T> = Result<T, ChatError>;

fn join_ids(ids: &[UserId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
