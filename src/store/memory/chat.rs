//! Conversations, chat messages and read markers.

use super::{MemoryTx, missing_reference, newest_first};
use crate::chat::domain::{
    ChatMessage, ChatMessageId, Conversation, ConversationId, MessageReadStatus,
};
use crate::chat::ports::ChatRecords;
use crate::store::{StoreError, StoreResult};
use crate::user::domain::UserId;
use std::collections::BTreeSet;

impl MemoryTx<'_> {
    fn check_participants(&self, conversation: &Conversation) -> StoreResult<()> {
        if let Some(missing) = conversation
            .participants()
            .iter()
            .find(|user| !self.state.has_user(**user))
        {
            return Err(missing_reference("user", missing));
        }
        Ok(())
    }
}

impl ChatRecords for MemoryTx<'_> {
    fn insert_conversation(&mut self, conversation: &Conversation) -> StoreResult<()> {
        if self
            .state
            .conversations
            .iter()
            .any(|row| row.id() == conversation.id())
        {
            return Err(StoreError::Conflict(format!(
                "conversation {} already exists",
                conversation.id()
            )));
        }
        self.check_participants(conversation)?;
        self.state.conversations.push(conversation.clone());
        Ok(())
    }

    fn update_conversation(&mut self, conversation: &Conversation) -> StoreResult<()> {
        self.check_participants(conversation)?;
        let row = self
            .state
            .conversations
            .iter_mut()
            .find(|row| row.id() == conversation.id())
            .ok_or_else(|| StoreError::not_found("conversation", conversation.id()))?;
        *row = conversation.clone();
        Ok(())
    }

    fn find_conversation(&mut self, id: ConversationId) -> StoreResult<Option<Conversation>> {
        Ok(self
            .state
            .conversations
            .iter()
            .find(|row| row.id() == id)
            .cloned())
    }

    fn list_conversations(&mut self) -> StoreResult<Vec<Conversation>> {
        Ok(newest_first(self.state.conversations.clone(), |row| {
            (row.created_at(), row.id())
        }))
    }

    fn conversations_for(&mut self, user: UserId) -> StoreResult<Vec<Conversation>> {
        let rows: Vec<Conversation> = self
            .state
            .conversations
            .iter()
            .filter(|row| row.is_participant(user))
            .cloned()
            .collect();
        Ok(newest_first(rows, |row| (row.created_at(), row.id())))
    }

    fn delete_conversation(&mut self, id: ConversationId) -> StoreResult<bool> {
        let state = &mut *self.state;
        let before = state.conversations.len();
        state.conversations.retain(|row| row.id() != id);
        if state.conversations.len() == before {
            return Ok(false);
        }
        let doomed: Vec<ChatMessageId> = state
            .chat_messages
            .iter()
            .filter(|message| message.conversation_id() == id)
            .map(ChatMessage::id)
            .collect();
        state
            .chat_messages
            .retain(|message| message.conversation_id() != id);
        state
            .read_statuses
            .retain(|(message_id, _), _| !doomed.contains(message_id));
        Ok(true)
    }

    fn insert_chat_message(&mut self, message: &ChatMessage) -> StoreResult<()> {
        if self
            .state
            .chat_messages
            .iter()
            .any(|row| row.id() == message.id())
        {
            return Err(StoreError::Conflict(format!(
                "chat message {} already exists",
                message.id()
            )));
        }
        if !self
            .state
            .conversations
            .iter()
            .any(|row| row.id() == message.conversation_id())
        {
            return Err(missing_reference("conversation", message.conversation_id()));
        }
        if !self.state.has_user(message.sender()) {
            return Err(missing_reference("user", message.sender()));
        }
        self.state.chat_messages.push(message.clone());
        Ok(())
    }

    fn update_chat_message(&mut self, message: &ChatMessage) -> StoreResult<()> {
        let row = self
            .state
            .chat_messages
            .iter_mut()
            .find(|row| row.id() == message.id())
            .ok_or_else(|| StoreError::not_found("chat message", message.id()))?;
        *row = message.clone();
        Ok(())
    }

    fn find_chat_message(&mut self, id: ChatMessageId) -> StoreResult<Option<ChatMessage>> {
        Ok(self
            .state
            .chat_messages
            .iter()
            .find(|row| row.id() == id)
            .cloned())
    }

    fn delete_chat_message(&mut self, id: ChatMessageId) -> StoreResult<bool> {
        let before = self.state.chat_messages.len();
        self.state.chat_messages.retain(|row| row.id() != id);
        if self.state.chat_messages.len() == before {
            return Ok(false);
        }
        self.state
            .read_statuses
            .retain(|(message_id, _), _| *message_id != id);
        Ok(true)
    }

    fn chat_messages_in(
        &mut self,
        conversation_id: ConversationId,
    ) -> StoreResult<Vec<ChatMessage>> {
        let mut rows: Vec<ChatMessage> = self
            .state
            .chat_messages
            .iter()
            .filter(|row| row.conversation_id() == conversation_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.sent_at(), row.id()));
        Ok(rows)
    }

    fn list_chat_messages(&mut self) -> StoreResult<Vec<ChatMessage>> {
        let mut rows = self.state.chat_messages.clone();
        rows.sort_by_key(|row| (row.sent_at(), row.id()));
        Ok(rows)
    }

    fn insert_read_statuses(&mut self, statuses: &[MessageReadStatus]) -> StoreResult<usize> {
        let mut written = 0;
        for status in statuses {
            if !self
                .state
                .chat_messages
                .iter()
                .any(|row| row.id() == status.message_id())
            {
                return Err(missing_reference("chat message", status.message_id()));
            }
            if !self.state.has_user(status.user_id()) {
                return Err(missing_reference("user", status.user_id()));
            }
            let key = (status.message_id(), status.user_id());
            if !self.state.read_statuses.contains_key(&key) {
                self.state.read_statuses.insert(key, *status);
                written += 1;
            }
        }
        Ok(written)
    }

    fn read_message_ids(
        &mut self,
        conversation_id: ConversationId,
        user: UserId,
    ) -> StoreResult<BTreeSet<ChatMessageId>> {
        let in_conversation: BTreeSet<ChatMessageId> = self
            .state
            .chat_messages
            .iter()
            .filter(|row| row.conversation_id() == conversation_id)
            .map(ChatMessage::id)
            .collect();
        Ok(self
            .state
            .read_statuses
            .keys()
            .filter(|(message_id, reader)| *reader == user && in_conversation.contains(message_id))
            .map(|(message_id, _)| *message_id)
            .collect())
    }
}
