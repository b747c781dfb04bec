//! Persistence contract for conversations, chat messages and read markers.

use crate::chat::domain::{
    ChatMessage, ChatMessageId, Conversation, ConversationId, MessageReadStatus,
};
use crate::store::StoreResult;
use crate::user::domain::UserId;
use std::collections::BTreeSet;

/// Conversation rows reachable inside a store transaction.
pub trait ChatRecords {
    /// Inserts a conversation together with its participants.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::InvalidReference`] when a
    /// participant does not exist.
    fn insert_conversation(&mut self, conversation: &Conversation) -> StoreResult<()>;

    /// Overwrites title, flags, timestamps and participant set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::NotFound`] when the conversation is
    /// missing.
    fn update_conversation(&mut self, conversation: &Conversation) -> StoreResult<()>;

    /// Finds a conversation by identifier.
    ///
    /// # Errors
    ///
    /// Returns a store error when the lookup fails.
    fn find_conversation(&mut self, id: ConversationId) -> StoreResult<Option<Conversation>>;

    /// Lists every conversation, newest first.
    ///
    /// # Errors
    ///
    /// Returns a store error when the query fails.
    fn list_conversations(&mut self) -> StoreResult<Vec<Conversation>>;

    /// Lists conversations `user` participates in, newest first.
    ///
    /// # Errors
    ///
    /// Returns a store error when the query fails.
    fn conversations_for(&mut self, user: UserId) -> StoreResult<Vec<Conversation>>;

    /// Deletes a conversation with its messages and read markers.
    ///
    /// # Errors
    ///
    /// Returns a store error when the delete fails.
    fn delete_conversation(&mut self, id: ConversationId) -> StoreResult<bool>;

    /// Inserts a chat message.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::InvalidReference`] when the
    /// conversation or sender does not exist.
    fn insert_chat_message(&mut self, message: &ChatMessage) -> StoreResult<()>;

    /// Overwrites the body of an existing chat message.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::NotFound`] when the message is
    /// missing.
    fn update_chat_message(&mut self, message: &ChatMessage) -> StoreResult<()>;

    /// Finds a chat message by identifier.
    ///
    /// # Errors
    ///
    /// Returns a store error when the lookup fails.
    fn find_chat_message(&mut self, id: ChatMessageId) -> StoreResult<Option<ChatMessage>>;

    /// Deletes a chat message with its read markers.
    ///
    /// # Errors
    ///
    /// Returns a store error when the delete fails.
    fn delete_chat_message(&mut self, id: ChatMessageId) -> StoreResult<bool>;

    /// Lists messages of one conversation, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a store error when the query fails.
    fn chat_messages_in(
        &mut self,
        conversation_id: ConversationId,
    ) -> StoreResult<Vec<ChatMessage>>;

    /// Lists every chat message, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a store error when the query fails.
    fn list_chat_messages(&mut self) -> StoreResult<Vec<ChatMessage>>;

    /// Inserts read markers, skipping pairs that already exist.
    ///
    /// Returns how many markers were actually written.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::InvalidReference`] when a message
    /// or reader does not exist.
    fn insert_read_statuses(&mut self, statuses: &[MessageReadStatus]) -> StoreResult<usize>;

    /// Returns the messages of `conversation_id` that `user` has read.
    ///
    /// # Errors
    ///
    /// Returns a store error when the query fails.
    fn read_message_ids(
        &mut self,
        conversation_id: ConversationId,
        user: UserId,
    ) -> StoreResult<BTreeSet<ChatMessageId>>;
}
