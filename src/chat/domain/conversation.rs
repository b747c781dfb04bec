//! Conversation aggregate root.

use super::{ChatDomainError, ConversationId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Longest title accepted, matching the `VARCHAR(255)` column.
const MAX_TITLE_LENGTH: usize = 255;

/// A thread shared by a set of participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    title: String,
    participants: BTreeSet<UserId>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedConversationData {
    /// Persisted identifier.
    pub id: ConversationId,
    /// Persisted title.
    pub title: String,
    /// Persisted participant set.
    pub participants: BTreeSet<UserId>,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Starts a new active conversation.
    ///
    /// Duplicate participant identifiers collapse into one membership.
    ///
    /// # Errors
    ///
    /// Returns [`ChatDomainError::NoParticipants`] for an empty participant
    /// list or [`ChatDomainError::TitleTooLong`] for an oversized title.
    pub fn start(
        title: impl Into<String>,
        participants: impl IntoIterator<Item = UserId>,
        clock: &impl Clock,
    ) -> Result<Self, ChatDomainError> {
        let members: BTreeSet<UserId> = participants.into_iter().collect();
        if members.is_empty() {
            return Err(ChatDomainError::NoParticipants);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: ConversationId::new(),
            title: validated_title(title.into())?,
            participants: members,
            is_active: true,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a conversation from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedConversationData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            participants: data.participants,
            is_active: data.is_active,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the conversation identifier.
    #[must_use]
    pub const fn id(&self) -> ConversationId {
        self.id
    }

    /// Returns the title, which may be empty.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the participant set.
    #[must_use]
    pub const fn participants(&self) -> &BTreeSet<UserId> {
        &self.participants
    }

    /// Returns `true` if `user` belongs to the conversation.
    #[must_use]
    pub fn is_participant(&self, user: UserId) -> bool {
        self.participants.contains(&user)
    }

    /// Returns `false` once the conversation has been archived.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Adds `user`, returning `false` when already a participant.
    pub fn add_participant(&mut self, user: UserId, clock: &impl Clock) -> bool {
        let added = self.participants.insert(user);
        if added {
            self.touch(clock);
        }
        added
    }

    /// Removes `user`, returning `false` when not a participant.
    ///
    /// # Errors
    ///
    /// Returns [`ChatDomainError::LastParticipant`] when at most one
    /// participant remains.
    pub fn remove_participant(
        &mut self,
        user: UserId,
        clock: &impl Clock,
    ) -> Result<bool, ChatDomainError> {
        if self.participants.len() <= 1 {
            return Err(ChatDomainError::LastParticipant);
        }
        let removed = self.participants.remove(&user);
        if removed {
            self.touch(clock);
        }
        Ok(removed)
    }

    /// Replaces the whole participant set.
    ///
    /// # Errors
    ///
    /// Returns [`ChatDomainError::NoParticipants`] when `participants` is
    /// empty.
    pub fn replace_participants(
        &mut self,
        participants: impl IntoIterator<Item = UserId>,
        clock: &impl Clock,
    ) -> Result<(), ChatDomainError> {
        let members: BTreeSet<UserId> = participants.into_iter().collect();
        if members.is_empty() {
            return Err(ChatDomainError::NoParticipants);
        }
        self.participants = members;
        self.touch(clock);
        Ok(())
    }

    /// Changes the title.
    ///
    /// # Errors
    ///
    /// Returns [`ChatDomainError::TitleTooLong`] for an oversized title.
    pub fn rename(
        &mut self,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), ChatDomainError> {
        self.title = validated_title(title.into())?;
        self.touch(clock);
        Ok(())
    }

    /// Archives or reactivates the conversation.
    pub fn set_active(&mut self, active: bool, clock: &impl Clock) {
        if self.is_active != active {
            self.is_active = active;
            self.touch(clock);
        }
    }

    /// Drops `user` without the last-participant rule, for account deletion.
    pub(crate) fn forget_participant(&mut self, user: UserId) -> bool {
        self.participants.remove(&user)
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validated_title(title: String) -> Result<String, ChatDomainError> {
    let trimmed = title.trim();
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(ChatDomainError::TitleTooLong);
    }
    Ok(trimmed.to_owned())
}
