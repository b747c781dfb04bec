//! Notifications addressed to a single user.

use super::{MessageDomainError, MessageId, NotificationId, ParseNotificationTypeError};
use crate::user::domain::{UserId, Username};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of event a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// A new direct message arrived.
    Message,
    /// An operator or system announcement.
    System,
}

impl NotificationType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::System => "system",
        }
    }
}

impl TryFrom<&str> for NotificationType {
    type Error = ParseNotificationTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "message" => Ok(Self::Message),
            "system" => Ok(Self::System),
            _ => Err(ParseNotificationTypeError(value.to_owned())),
        }
    }
}

/// A notice shown to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    user_id: UserId,
    message_id: Option<MessageId>,
    notification_type: NotificationType,
    content: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNotificationData {
    /// Persisted identifier.
    pub id: NotificationId,
    /// Persisted recipient.
    pub user_id: UserId,
    /// Persisted originating message, if any.
    pub message_id: Option<MessageId>,
    /// Persisted type tag.
    pub notification_type: NotificationType,
    /// Persisted text.
    pub content: String,
    /// Persisted read flag.
    pub is_read: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Builds the notice a receiver gets for a newly created message.
    #[must_use]
    pub fn new_message(
        recipient: UserId,
        message_id: MessageId,
        sender: &Username,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            user_id: recipient,
            message_id: Some(message_id),
            notification_type: NotificationType::Message,
            content: format!("You have a new message from {sender}"),
            is_read: false,
            created_at,
        }
    }

    /// Builds a system notice not tied to any message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyNotificationContent`] when
    /// `content` is blank.
    pub fn system(
        recipient: UserId,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, MessageDomainError> {
        let text = content.into();
        if text.trim().is_empty() {
            return Err(MessageDomainError::EmptyNotificationContent);
        }
        Ok(Self {
            id: NotificationId::new(),
            user_id: recipient,
            message_id: None,
            notification_type: NotificationType::System,
            content: text,
            is_read: false,
            created_at,
        })
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            message_id: data.message_id,
            notification_type: data.notification_type,
            content: data.content,
            is_read: data.is_read,
            created_at: data.created_at,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the message that triggered this notice, if any.
    #[must_use]
    pub const fn message_id(&self) -> Option<MessageId> {
        self.message_id
    }

    /// Returns the type tag.
    #[must_use]
    pub const fn notification_type(&self) -> NotificationType {
        self.notification_type
    }

    /// Returns the notice text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` once the recipient has read the notice.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.is_read
    }

    /// Returns when the notice was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the notice as read, returning `false` if it already was.
    pub const fn mark_as_read(&mut self) -> bool {
        let changed = !self.is_read;
        self.is_read = true;
        changed
    }
}
