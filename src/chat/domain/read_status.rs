//! Per-user read markers and the unread arithmetic built on them.

use super::{ChatMessage, ChatMessageId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Records that `user_id` has seen `message_id`.
///
/// At most one marker exists per (message, user) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageReadStatus {
    message_id: ChatMessageId,
    user_id: UserId,
    read_at: DateTime<Utc>,
}

impl MessageReadStatus {
    /// Creates a read marker.
    #[must_use]
    pub const fn new(message_id: ChatMessageId, user_id: UserId, read_at: DateTime<Utc>) -> Self {
        Self {
            message_id,
            user_id,
            read_at,
        }
    }

    /// Returns the message that was read.
    #[must_use]
    pub const fn message_id(&self) -> ChatMessageId {
        self.message_id
    }

    /// Returns the reader.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns when the message was read.
    #[must_use]
    pub const fn read_at(&self) -> DateTime<Utc> {
        self.read_at
    }
}

fn is_unread_for(
    message: &ChatMessage,
    reader: UserId,
    already_read: &BTreeSet<ChatMessageId>,
) -> bool {
    message.sender() != reader && !already_read.contains(&message.id())
}

/// Builds the markers needed to mark every unread message in `messages` as
/// read by `reader`.
///
/// Messages authored by `reader` and messages in `already_read` are skipped.
#[must_use]
pub fn pending_read_statuses(
    messages: &[ChatMessage],
    reader: UserId,
    already_read: &BTreeSet<ChatMessageId>,
    read_at: DateTime<Utc>,
) -> Vec<MessageReadStatus> {
    messages
        .iter()
        .filter(|message| is_unread_for(message, reader, already_read))
        .map(|message| MessageReadStatus::new(message.id(), reader, read_at))
        .collect()
}

/// Counts messages in `messages` that `reader` did not author and has not read.
#[must_use]
pub fn unread_count(
    messages: &[ChatMessage],
    reader: UserId,
    already_read: &BTreeSet<ChatMessageId>,
) -> usize {
    messages
        .iter()
        .filter(|message| is_unread_for(message, reader, already_read))
        .count()
}
