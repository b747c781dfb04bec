//! Append-only snapshots of message content taken before each edit.

use super::{HistoryId, MessageId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The content a message held before one edit.
///
/// History entries are never mutated. They disappear only when the owning
/// message is deleted; deleting the editor clears `edited_by` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHistory {
    id: HistoryId,
    message_id: MessageId,
    old_content: String,
    edited_at: DateTime<Utc>,
    edited_by: Option<UserId>,
}

impl MessageHistory {
    /// Captures `old_content` as the state of `message_id` prior to an edit.
    #[must_use]
    pub fn snapshot(
        message_id: MessageId,
        old_content: impl Into<String>,
        edited_by: Option<UserId>,
        edited_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: HistoryId::new(),
            message_id,
            old_content: old_content.into(),
            edited_at,
            edited_by,
        }
    }

    /// Reconstructs a history entry from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: HistoryId,
        message_id: MessageId,
        old_content: String,
        edited_at: DateTime<Utc>,
        edited_by: Option<UserId>,
    ) -> Self {
        Self {
            id,
            message_id,
            old_content,
            edited_at,
            edited_by,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryId {
        self.id
    }

    /// Returns the message this entry belongs to.
    #[must_use]
    pub const fn message_id(&self) -> MessageId {
        self.message_id
    }

    /// Returns the content before the edit.
    #[must_use]
    pub fn old_content(&self) -> &str {
        &self.old_content
    }

    /// Returns when the edit happened.
    #[must_use]
    pub const fn edited_at(&self) -> DateTime<Utc> {
        self.edited_at
    }

    /// Returns who made the edit, if that user still exists.
    #[must_use]
    pub const fn edited_by(&self) -> Option<UserId> {
        self.edited_by
    }

    /// Detaches the entry from its editor once their account is deleted.
    pub(crate) const fn clear_editor(&mut self) {
        self.edited_by = None;
    }
}
