//! Read models returned by the chat services.

use crate::chat::domain::{ChatMessage, ChatMessageId, ChatMessageType, ConversationId};
use crate::user::domain::{User, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Public profile of a conversation participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantView {
    /// User identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// First and last name.
    pub full_name: String,
}

impl From<&User> for ParticipantView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            full_name: user.full_name(),
        }
    }
}

/// Preview of the newest message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastMessageView {
    /// Message identifier.
    pub message_id: ChatMessageId,
    /// Author identifier.
    pub sender_id: UserId,
    /// Author's full name.
    pub sender_name: String,
    /// Truncated body.
    pub preview: String,
    /// Payload kind.
    pub message_type: ChatMessageType,
    /// When it was sent.
    pub sent_at: DateTime<Utc>,
}

/// Overview of one conversation from a viewer's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSummary {
    /// Conversation identifier.
    pub conversation_id: ConversationId,
    /// Title.
    pub title: String,
    /// Current participants.
    pub participants: Vec<ParticipantView>,
    /// Number of participants.
    pub participant_count: usize,
    /// Number of messages.
    pub message_count: usize,
    /// Messages the viewer has not read; zero without a viewer.
    pub unread_count: usize,
    /// Newest message, if any.
    pub last_message: Option<LastMessageView>,
    /// Up to [`ConversationSummary::RECENT_LIMIT`] messages, newest first.
    pub recent_messages: Vec<ChatMessage>,
    /// Whether the conversation is active.
    pub is_active: bool,
    /// When the conversation was created.
    pub created_at: DateTime<Utc>,
    /// When the conversation was last changed.
    pub updated_at: DateTime<Utc>,
}

impl ConversationSummary {
    /// Number of messages included in `recent_messages`.
    pub const RECENT_LIMIT: usize = 20;
}

/// Messages a user has not read across all their conversations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadMessages {
    /// Number of unread messages.
    pub count: usize,
    /// The unread messages, newest first.
    pub messages: Vec<ChatMessage>,
}
