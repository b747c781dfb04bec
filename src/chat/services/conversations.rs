//! Conversation lifecycle, membership and read tracking.

use super::views::{ConversationSummary, LastMessageView, ParticipantView};
use super::{
    ChatError, ChatResult, ensure_participant, load_conversation, load_user, require_users,
};
use crate::chat::domain::{
    ChatMessage, Conversation, ConversationId, pending_read_statuses, unread_count,
};
use crate::store::{Store, StoreResult, StoreTx};
use crate::user::domain::{User, UserId};
use mockable::Clock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Request payload for starting a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateConversationRequest {
    title: String,
    participant_ids: Vec<UserId>,
}

impl CreateConversationRequest {
    /// Creates a request; duplicate identifiers are collapsed.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        participant_ids: impl IntoIterator<Item = UserId>,
    ) -> Self {
        Self {
            title: title.into(),
            participant_ids: participant_ids.into_iter().collect(),
        }
    }
}

/// Partial update of a conversation. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateConversationRequest {
    title: Option<String>,
    participant_ids: Option<Vec<UserId>>,
    is_active: Option<bool>,
}

impl UpdateConversationRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the participant set.
    #[must_use]
    pub fn with_participants(mut self, participant_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.participant_ids = Some(participant_ids.into_iter().collect());
        self
    }

    /// Archives or reactivates the conversation.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// Conversation service.
#[derive(Clone)]
pub struct ConversationService<S, C>
where
    S: Store,
    C: Clock + Send + Sync + 'static,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ConversationService<S, C>
where
    S: Store,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new conversation service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Starts a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Domain`] for an empty participant list or an
    /// oversized title and [`ChatError::InvalidParticipants`] listing every
    /// identifier that does not exist.
    pub async fn create(&self, request: CreateConversationRequest) -> ChatResult<Conversation> {
        let conversation =
            Conversation::start(request.title, request.participant_ids, &*self.clock)?;
        let created = self
            .store
            .transaction(move |tx| {
                require_users(tx, conversation.participants())?;
                tx.insert_conversation(&conversation)?;
                Ok::<_, ChatError>(conversation)
            })
            .await?;
        tracing::info!(
            conversation_id = %created.id(),
            participants = created.participants().len(),
            "created conversation"
        );
        Ok(created)
    }

    /// Fetches a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConversationNotFound`] when it does not exist.
    pub async fn get(&self, id: ConversationId) -> ChatResult<Conversation> {
        self.store
            .transaction(move |tx| load_conversation(tx, id))
            .await
    }

    /// Lists every conversation, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Store`] when the query fails.
    pub async fn list(&self) -> ChatResult<Vec<Conversation>> {
        self.store
            .transaction(|tx| Ok(tx.list_conversations()?))
            .await
    }

    /// Lists conversations `user` takes part in, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::UserNotFound`] when the user does not exist.
    pub async fn for_user(&self, user: UserId) -> ChatResult<Vec<Conversation>> {
        self.store
            .transaction(move |tx| {
                load_user(tx, user)?;
                Ok(tx.conversations_for(user)?)
            })
            .await
    }

    /// Finds conversations with a participant whose email, first name or
    /// last name contains `query`, ignoring case. A blank query matches
    /// everything.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Store`] when the query fails.
    pub async fn search(&self, query: &str) -> ChatResult<Vec<Conversation>> {
        let needle = query.trim().to_owned();
        self.store
            .transaction(move |tx| {
                let conversations = tx.list_conversations()?;
                if needle.is_empty() {
                    return Ok(conversations);
                }
                let member_ids: Vec<UserId> = conversations
                    .iter()
                    .flat_map(|conversation| conversation.participants().iter().copied())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                let members: BTreeMap<UserId, User> = tx
                    .find_users(&member_ids)?
                    .into_iter()
                    .map(|user| (user.id(), user))
                    .collect();
                Ok(conversations
                    .into_iter()
                    .filter(|conversation| {
                        conversation.participants().iter().any(|id| {
                            members
                                .get(id)
                                .is_some_and(|user| user.matches_search(&needle))
                        })
                    })
                    .collect())
            })
            .await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConversationNotFound`] when the conversation does
    /// not exist, [`ChatError::Domain`] for invalid fields and
    /// [`ChatError::InvalidParticipants`] for unknown participants.
    pub async fn update(
        &self,
        id: ConversationId,
        request: UpdateConversationRequest,
    ) -> ChatResult<Conversation> {
        let clock = Arc::clone(&self.clock);
        let UpdateConversationRequest {
            title,
            participant_ids,
            is_active,
        } = request;
        self.store
            .transaction(move |tx| {
                let mut conversation = load_conversation(tx, id)?;
                if let Some(new_title) = title {
                    conversation.rename(new_title, &*clock)?;
                }
                if let Some(members) = participant_ids {
                    conversation.replace_participants(members, &*clock)?;
                    require_users(tx, conversation.participants())?;
                }
                if let Some(active) = is_active {
                    conversation.set_active(active, &*clock);
                }
                tx.update_conversation(&conversation)?;
                Ok(conversation)
            })
            .await
    }

    /// Deletes a conversation with its messages and read markers.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConversationNotFound`] when it does not exist.
    pub async fn delete(&self, id: ConversationId) -> ChatResult<()> {
        self.store
            .transaction(move |tx| {
                if tx.delete_conversation(id)? {
                    Ok(())
                } else {
                    Err(ChatError::ConversationNotFound(id))
                }
            })
            .await?;
        tracing::info!(conversation_id = %id, "deleted conversation");
        Ok(())
    }

    /// Adds `user` to the conversation; adding a member again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConversationNotFound`] or
    /// [`ChatError::UserNotFound`] when either does not exist.
    pub async fn add_participant(
        &self,
        id: ConversationId,
        user: UserId,
    ) -> ChatResult<Conversation> {
        let clock = Arc::clone(&self.clock);
        self.store
            .transaction(move |tx| {
                let mut conversation = load_conversation(tx, id)?;
                load_user(tx, user)?;
                if conversation.add_participant(user, &*clock) {
                    tx.update_conversation(&conversation)?;
                }
                Ok(conversation)
            })
            .await
    }

    /// Removes `user` from the conversation.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConversationNotFound`] or
    /// [`ChatError::UserNotFound`] when either does not exist and
    /// [`ChatError::Domain`] when only one participant remains.
    pub async fn remove_participant(
        &self,
        id: ConversationId,
        user: UserId,
    ) -> ChatResult<Conversation> {
        let clock = Arc::clone(&self.clock);
        self.store
            .transaction(move |tx| {
                let mut conversation = load_conversation(tx, id)?;
                load_user(tx, user)?;
                if conversation.remove_participant(user, &*clock)? {
                    tx.update_conversation(&conversation)?;
                }
                Ok(conversation)
            })
            .await
    }

    /// Summarises a conversation. `viewer` determines the unread count.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConversationNotFound`] when it does not exist.
    pub async fn summary(
        &self,
        id: ConversationId,
        viewer: Option<UserId>,
    ) -> ChatResult<ConversationSummary> {
        self.store
            .transaction(move |tx| {
                let conversation = load_conversation(tx, id)?;
                let member_ids: Vec<UserId> = conversation.participants().iter().copied().collect();
                let participants: Vec<ParticipantView> = tx
                    .find_users(&member_ids)?
                    .iter()
                    .map(ParticipantView::from)
                    .collect();
                let messages = tx.chat_messages_in(id)?;
                let unread = viewer
                    .map(|reader| {
                        tx.read_message_ids(id, reader)
                            .map(|read| unread_count(&messages, reader, &read))
                    })
                    .transpose()?
                    .unwrap_or_default();
                let last_message = messages
                    .last()
                    .map(|last| last_message_view(tx, last))
                    .transpose()?;
                let recent_messages = messages
                    .iter()
                    .rev()
                    .take(ConversationSummary::RECENT_LIMIT)
                    .cloned()
                    .collect();
                Ok(ConversationSummary {
                    conversation_id: conversation.id(),
                    title: conversation.title().to_owned(),
                    participant_count: participants.len(),
                    participants,
                    message_count: messages.len(),
                    unread_count: unread,
                    last_message,
                    recent_messages,
                    is_active: conversation.is_active(),
                    created_at: conversation.created_at(),
                    updated_at: conversation.updated_at(),
                })
            })
            .await
    }

    /// Marks every message in the conversation as read for `user`, except
    /// their own. Returns how many markers were written; calling it again
    /// writes none.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConversationNotFound`] when the conversation does
    /// not exist and [`ChatError::NotParticipant`] when `user` is not a
    /// member.
    pub async fn mark_read(&self, id: ConversationId, user: UserId) -> ChatResult<usize> {
        let read_at = self.clock.utc();
        let written = self
            .store
            .transaction(move |tx| {
                let conversation = load_conversation(tx, id)?;
                ensure_participant(&conversation, user)?;
                let messages = tx.chat_messages_in(id)?;
                let already_read = tx.read_message_ids(id, user)?;
                let pending = pending_read_statuses(&messages, user, &already_read, read_at);
                Ok::<_, ChatError>(tx.insert_read_statuses(&pending)?)
            })
            .await?;
        tracing::debug!(
            conversation_id = %id,
            user_id = %user,
            written,
            "marked conversation read"
        );
        Ok(written)
    }

    /// Counts messages in the conversation that `user` has not read.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConversationNotFound`] when the conversation does
    /// not exist and [`ChatError::NotParticipant`] when `user` is not a
    /// member.
    pub async fn unread_count(&self, id: ConversationId, user: UserId) -> ChatResult<usize> {
        self.store
            .transaction(move |tx| {
                let conversation = load_conversation(tx, id)?;
                ensure_participant(&conversation, user)?;
                let messages = tx.chat_messages_in(id)?;
                let already_read = tx.read_message_ids(id, user)?;
                Ok(unread_count(&messages, user, &already_read))
            })
            .await
    }
}

fn last_message_view(tx: &mut dyn StoreTx, last: &ChatMessage) -> StoreResult<LastMessageView> {
    let sender_name = tx
        .find_user(last.sender())?
        .map(|sender| sender.full_name())
        .unwrap_or_default();
    Ok(LastMessageView {
        message_id: last.id(),
        sender_id: last.sender(),
        sender_name,
        preview: last.preview(),
        message_type: last.message_type(),
        sent_at: last.sent_at(),
    })
}
