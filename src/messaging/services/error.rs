//! Service-level errors for direct messaging.

use crate::error::ErrorKind;
use crate::messaging::domain::{MessageDomainError, MessageId, NotificationId};
use crate::store::StoreError;
use crate::user::domain::UserId;
use thiserror::Error;

/// Errors returned by [`super::MessagingService`].
#[derive(Debug, Error)]
pub enum MessagingError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] MessageDomainError),
    /// A request referenced a user that does not exist.
    #[error("unknown user {0}")]
    UnknownUser(UserId),
    /// The addressed user does not exist.
    #[error("user {0} not found")]
    UserNotFound(UserId),
    /// The addressed message does not exist.
    #[error("message {0} not found")]
    MessageNotFound(MessageId),
    /// The addressed notification does not exist.
    #[error("notification {0} not found")]
    NotificationNotFound(NotificationId),
    /// Only the sender may change or delete a message.
    #[error("user {user} did not send message {message_id}")]
    NotSender {
        /// Message the caller tried to change.
        message_id: MessageId,
        /// The caller.
        user: UserId,
    },
    /// Only a party to a message may reply to it.
    #[error("user {user} is not a party to message {message_id}")]
    NotInThread {
        /// Message the caller tried to reply to.
        message_id: MessageId,
        /// The caller.
        user: UserId,
    },
    /// Only the receiver may mark a message as read.
    #[error("message {message_id} was not sent to user {user}")]
    NotReceiver {
        /// Message the caller tried to mark.
        message_id: MessageId,
        /// The caller.
        user: UserId,
    },
    /// Only the recipient may mark a notification as read.
    #[error("notification {notification_id} is not addressed to user {user}")]
    NotRecipient {
        /// Notification the caller tried to change.
        notification_id: NotificationId,
        /// The caller.
        user: UserId,
    },
    /// Account deletion was requested without typing `delete`.
    #[error("account deletion requires the confirmation text \"delete\"")]
    ConfirmationRequired,
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MessagingError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::UnknownUser(_) | Self::ConfirmationRequired => {
                ErrorKind::InvalidInput
            }
            Self::UserNotFound(_) | Self::MessageNotFound(_) | Self::NotificationNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::NotSender { .. }
            | Self::NotInThread { .. }
            | Self::NotReceiver { .. }
            | Self::NotRecipient { .. } => ErrorKind::Forbidden,
            Self::Store(err) => err.kind(),
        }
    }
}

/// Result type for messaging service operations.
pub type MessagingResult<T> = Result<T, MessagingError>;
