//! Posting, editing and reading chat messages.

use super::views::UnreadMessages;
use super::{ChatError, ChatResult, ensure_participant, load_conversation, load_user};
use crate::chat::domain::{
    ChatMessage, ChatMessageId, ChatMessageType, ConversationId, MessageReadStatus,
};
use crate::store::{Store, StoreResult, StoreTx};
use crate::user::domain::{User, UserId};
use mockable::Clock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Request payload for posting a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendChatMessageRequest {
    sender: UserId,
    conversation_id: ConversationId,
    body: String,
    message_type: ChatMessageType,
}

impl SendChatMessageRequest {
    /// Creates a text message request.
    #[must_use]
    pub fn new(sender: UserId, conversation_id: ConversationId, body: impl Into<String>) -> Self {
        Self {
            sender,
            conversation_id,
            body: body.into(),
            message_type: ChatMessageType::default(),
        }
    }

    /// Sets the payload kind.
    #[must_use]
    pub const fn with_type(mut self, message_type: ChatMessageType) -> Self {
        self.message_type = message_type;
        self
    }
}

/// Chat message service.
#[derive(Clone)]
pub struct ChatMessageService<S, C>
where
    S: Store,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ChatMessageService<S, C>
where
    S: Store,
    C: Clock + Send + Sync,
{
    /// Creates a new chat message service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Posts a message to a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Domain`] for a blank body,
    /// [`ChatError::UserNotFound`] or [`ChatError::ConversationNotFound`]
    /// when either does not exist and [`ChatError::NotParticipant`] when the
    /// sender is not a member.
    pub async fn send(&self, request: SendChatMessageRequest) -> ChatResult<ChatMessage> {
        let message = ChatMessage::post(
            request.conversation_id,
            request.sender,
            request.body,
            request.message_type,
            &*self.clock,
        )?;
        let posted = self
            .store
            .transaction(move |tx| {
                load_user(tx, message.sender())?;
                let conversation = load_conversation(tx, message.conversation_id())?;
                ensure_participant(&conversation, message.sender())?;
                tx.insert_chat_message(&message)?;
                Ok::<_, ChatError>(message)
            })
            .await?;
        tracing::debug!(
            message_id = %posted.id(),
            conversation_id = %posted.conversation_id(),
            "posted chat message"
        );
        Ok(posted)
    }

    /// Fetches a chat message.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::MessageNotFound`] when it does not exist.
    pub async fn get(&self, id: ChatMessageId) -> ChatResult<ChatMessage> {
        self.store
            .transaction(move |tx| load_message(tx, id))
            .await
    }

    /// Lists messages oldest first, optionally limited to one conversation.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Store`] when the query fails.
    pub async fn list(&self, conversation: Option<ConversationId>) -> ChatResult<Vec<ChatMessage>> {
        self.store
            .transaction(move |tx| Ok(messages_in_scope(tx, conversation)?))
            .await
    }

    /// Finds messages whose sender email, body or conversation identifier
    /// contains `query`, ignoring case. A blank query matches everything.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Store`] when the query fails.
    pub async fn search(
        &self,
        query: &str,
        conversation: Option<ConversationId>,
    ) -> ChatResult<Vec<ChatMessage>> {
        let needle = query.trim().to_lowercase();
        self.store
            .transaction(move |tx| {
                let messages = messages_in_scope(tx, conversation)?;
                if needle.is_empty() {
                    return Ok(messages);
                }
                let sender_ids: Vec<UserId> = messages
                    .iter()
                    .map(ChatMessage::sender)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                let senders: BTreeMap<UserId, User> = tx
                    .find_users(&sender_ids)?
                    .into_iter()
                    .map(|user| (user.id(), user))
                    .collect();
                Ok(messages
                    .into_iter()
                    .filter(|message| {
                        message.body_contains(&needle)
                            || message
                                .conversation_id()
                                .to_string()
                                .contains(needle.as_str())
                            || senders.get(&message.sender()).is_some_and(|sender| {
                                sender.email().as_str().to_lowercase().contains(needle.as_str())
                            })
                    })
                    .collect())
            })
            .await
    }

    /// Replaces the body of a message.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::MessageNotFound`] when it does not exist,
    /// [`ChatError::NotAuthor`] when `editor` did not send it and
    /// [`ChatError::Domain`] for a blank body.
    pub async fn edit_body(
        &self,
        id: ChatMessageId,
        editor: UserId,
        body: impl Into<String>,
    ) -> ChatResult<ChatMessage> {
        let revised = body.into();
        self.store
            .transaction(move |tx| {
                let mut message = load_authored(tx, id, editor)?;
                message.revise(revised)?;
                tx.update_chat_message(&message)?;
                Ok(message)
            })
            .await
    }

    /// Deletes a message with its read markers.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::MessageNotFound`] when it does not exist and
    /// [`ChatError::NotAuthor`] when `actor` did not send it.
    pub async fn delete(&self, id: ChatMessageId, actor: UserId) -> ChatResult<()> {
        self.store
            .transaction(move |tx| {
                load_authored(tx, id, actor)?;
                tx.delete_chat_message(id)?;
                Ok::<_, ChatError>(())
            })
            .await?;
        tracing::info!(message_id = %id, "deleted chat message");
        Ok(())
    }

    /// Marks one message as read by `user`. Returns `false` when it already
    /// was.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::MessageNotFound`] or [`ChatError::UserNotFound`]
    /// when either does not exist, [`ChatError::OwnMessage`] when `user`
    /// wrote the message and [`ChatError::NotParticipant`] when `user` is not
    /// a member of its conversation.
    pub async fn mark_read(&self, id: ChatMessageId, user: UserId) -> ChatResult<bool> {
        let read_at = self.clock.utc();
        self.store
            .transaction(move |tx| {
                let message = load_message(tx, id)?;
                load_user(tx, user)?;
                if message.sender() == user {
                    return Err(ChatError::OwnMessage(id));
                }
                let conversation = load_conversation(tx, message.conversation_id())?;
                ensure_participant(&conversation, user)?;
                let written =
                    tx.insert_read_statuses(&[MessageReadStatus::new(id, user, read_at)])?;
                Ok(written > 0)
            })
            .await
    }

    /// Collects unread messages across every conversation of `user`, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::UserNotFound`] when the user does not exist.
    pub async fn unread_for(&self, user: UserId) -> ChatResult<UnreadMessages> {
        self.store
            .transaction(move |tx| {
                load_user(tx, user)?;
                let mut unread = Vec::new();
                for conversation in tx.conversations_for(user)? {
                    let already_read = tx.read_message_ids(conversation.id(), user)?;
                    unread.extend(
                        tx.chat_messages_in(conversation.id())?
                            .into_iter()
                            .filter(|message| {
                                message.sender() != user && !already_read.contains(&message.id())
                            }),
                    );
                }
                unread.sort_by(|left, right| right.sent_at().cmp(&left.sent_at()));
                Ok(UnreadMessages {
                    count: unread.len(),
                    messages: unread,
                })
            })
            .await
    }
}

fn load_message(tx: &mut dyn StoreTx, id: ChatMessageId) -> ChatResult<ChatMessage> {
    tx.find_chat_message(id)?
        .ok_or(ChatError::MessageNotFound(id))
}

fn load_authored(
    tx: &mut dyn StoreTx,
    id: ChatMessageId,
    author: UserId,
) -> ChatResult<ChatMessage> {
    let message = load_message(tx, id)?;
    if message.sender() != author {
        return Err(ChatError::NotAuthor {
            message_id: id,
            user: author,
        });
    }
    Ok(message)
}

fn messages_in_scope(
    tx: &mut dyn StoreTx,
    conversation: Option<ConversationId>,
) -> StoreResult<Vec<ChatMessage>> {
    if let Some(id) = conversation {
        return tx.chat_messages_in(id);
    }
    tx.list_chat_messages()
}
