//! Messages posted inside a conversation.

use super::{ChatDomainError, ChatMessageId, ConversationId, ParseChatMessageTypeError};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Number of characters kept by [`ChatMessage::preview`].
pub const PREVIEW_LENGTH: usize = 50;

/// Payload kind of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMessageType {
    /// Plain text.
    #[default]
    Text,
    /// An image reference.
    Image,
    /// A file reference.
    File,
}

impl ChatMessageType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::File => "file",
        }
    }
}

impl TryFrom<&str> for ChatMessageType {
    type Error = ParseChatMessageTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            "file" => Ok(Self::File),
            _ => Err(ParseChatMessageTypeError(value.to_owned())),
        }
    }
}

/// A message posted by a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: ChatMessageId,
    conversation_id: ConversationId,
    sender: UserId,
    body: String,
    message_type: ChatMessageType,
    sent_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedChatMessageData {
    /// Persisted identifier.
    pub id: ChatMessageId,
    /// Persisted owning conversation.
    pub conversation_id: ConversationId,
    /// Persisted author.
    pub sender: UserId,
    /// Persisted body.
    pub body: String,
    /// Persisted payload kind.
    pub message_type: ChatMessageType,
    /// Persisted send timestamp.
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Posts a new message into `conversation_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatDomainError::EmptyBody`] when `body` is blank.
    pub fn post(
        conversation_id: ConversationId,
        sender: UserId,
        body: impl Into<String>,
        message_type: ChatMessageType,
        clock: &impl Clock,
    ) -> Result<Self, ChatDomainError> {
        Ok(Self {
            id: ChatMessageId::new(),
            conversation_id,
            sender,
            body: non_blank(body.into())?,
            message_type,
            sent_at: clock.utc(),
        })
    }

    /// Reconstructs a chat message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedChatMessageData) -> Self {
        Self {
            id: data.id,
            conversation_id: data.conversation_id,
            sender: data.sender,
            body: data.body,
            message_type: data.message_type,
            sent_at: data.sent_at,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> ChatMessageId {
        self.id
    }

    /// Returns the owning conversation.
    #[must_use]
    pub const fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn sender(&self) -> UserId {
        self.sender
    }

    /// Returns the body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the payload kind.
    #[must_use]
    pub const fn message_type(&self) -> ChatMessageType {
        self.message_type
    }

    /// Returns when the message was posted.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Returns the first 50 characters of the body, suffixed with `...`
    /// when the body is longer.
    ///
    /// ```
    /// use postbox::chat::domain::{ChatMessage, ChatMessageType, ConversationId};
    /// use postbox::user::domain::UserId;
    /// use mockable::DefaultClock;
    ///
    /// let message = ChatMessage::post(
    ///     ConversationId::new(),
    ///     UserId::new(),
    ///     "short",
    ///     ChatMessageType::Text,
    ///     &DefaultClock,
    /// )
    /// .expect("valid message");
    /// assert_eq!(message.preview(), "short");
    /// ```
    #[must_use]
    pub fn preview(&self) -> String {
        if self.body.chars().count() > PREVIEW_LENGTH {
            let head: String = self.body.chars().take(PREVIEW_LENGTH).collect();
            format!("{head}...")
        } else {
            self.body.clone()
        }
    }

    /// Replaces the body.
    ///
    /// # Errors
    ///
    /// Returns [`ChatDomainError::EmptyBody`] when `body` is blank.
    pub fn revise(&mut self, body: impl Into<String>) -> Result<(), ChatDomainError> {
        self.body = non_blank(body.into())?;
        Ok(())
    }

    /// Returns `true` if the body contains `needle`, ignoring case.
    #[must_use]
    pub fn body_contains(&self, needle: &str) -> bool {
        self.body
            .to_lowercase()
            .contains(&needle.trim().to_lowercase())
    }
}

fn non_blank(body: String) -> Result<String, ChatDomainError> {
    if body.trim().is_empty() {
        return Err(ChatDomainError::EmptyBody);
    }
    Ok(body)
}
