//! Conversations, membership, chat messages and read markers.

use super::conversion_helpers::{
    chat_message_to_row, conversation_to_row, read_status_to_row, row_to_chat_message,
    row_to_conversation,
};
use super::models::{ChatMessageRow, ConversationRow, ParticipantRow, ReadStatusRow};
use super::schema::{
    chat_messages, conversation_participants, conversations, message_read_statuses,
};
use super::tx::PgTx;
use crate::chat::domain::{
    ChatMessage, ChatMessageId, Conversation, ConversationId, MessageReadStatus,
};
use crate::chat::ports::ChatRecords;
use crate::store::{StoreError, StoreResult};
use crate::user::domain::UserId;
use diesel::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Rows per read-status `INSERT`; three binds each keeps a statement under
/// the 65,535 bind parameter limit.
const READ_STATUS_BATCH: usize = 5_000;

impl PgTx<'_> {
    fn write_participants(&mut self, conversation: &Conversation) -> StoreResult<()> {
        let conversation_id = conversation.id().into_inner();
        diesel::delete(
            conversation_participants::table
                .filter(conversation_participants::conversation_id.eq(conversation_id)),
        )
        .execute(self.conn)?;
        let rows: Vec<ParticipantRow> = conversation
            .participants()
            .iter()
            .map(|user| ParticipantRow {
                conversation_id,
                user_id: user.into_inner(),
            })
            .collect();
        if !rows.is_empty() {
            diesel::insert_into(conversation_participants::table)
                .values(&rows)
                .execute(self.conn)?;
        }
        Ok(())
    }

    /// Attaches participant sets to conversation rows, preserving row order.
    fn hydrate(&mut self, rows: Vec<ConversationRow>) -> StoreResult<Vec<Conversation>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let memberships: Vec<ParticipantRow> = conversation_participants::table
            .filter(conversation_participants::conversation_id.eq_any(ids))
            .select(ParticipantRow::as_select())
            .load(self.conn)?;
        let mut members: BTreeMap<Uuid, BTreeSet<UserId>> = BTreeMap::new();
        for membership in memberships {
            members
                .entry(membership.conversation_id)
                .or_default()
                .insert(UserId::from_uuid(membership.user_id));
        }
        Ok(rows
            .into_iter()
            .map(|row| {
                let participants = members.remove(&row.id).unwrap_or_default();
                row_to_conversation(row, participants)
            })
            .collect())
    }
}

impl ChatRecords for PgTx<'_> {
    fn insert_conversation(&mut self, conversation: &Conversation) -> StoreResult<()> {
        diesel::insert_into(conversations::table)
            .values(&conversation_to_row(conversation))
            .execute(self.conn)?;
        self.write_participants(conversation)
    }

    fn update_conversation(&mut self, conversation: &Conversation) -> StoreResult<()> {
        let updated = diesel::update(conversations::table.find(conversation.id().into_inner()))
            .set((
                conversations::title.eq(conversation.title()),
                conversations::is_active.eq(conversation.is_active()),
                conversations::updated_at.eq(conversation.updated_at()),
            ))
            .execute(self.conn)?;
        if updated == 0 {
            return Err(StoreError::not_found("conversation", conversation.id()));
        }
        self.write_participants(conversation)
    }

    fn find_conversation(&mut self, id: ConversationId) -> StoreResult<Option<Conversation>> {
        let row = conversations::table
            .find(id.into_inner())
            .select(ConversationRow::as_select())
            .first(self.conn)
            .optional()?;
        Ok(self.hydrate(row.into_iter().collect())?.into_iter().next())
    }

    fn list_conversations(&mut self) -> StoreResult<Vec<Conversation>> {
        let rows = conversations::table
            .order((conversations::created_at.desc(), conversations::id.desc()))
            .select(ConversationRow::as_select())
            .load(self.conn)?;
        self.hydrate(rows)
    }

    fn conversations_for(&mut self, user: UserId) -> StoreResult<Vec<Conversation>> {
        let member_of = conversation_participants::table
            .filter(conversation_participants::user_id.eq(user.into_inner()))
            .select(conversation_participants::conversation_id);
        let rows = conversations::table
            .filter(conversations::id.eq_any(member_of))
            .order((conversations::created_at.desc(), conversations::id.desc()))
            .select(ConversationRow::as_select())
            .load(self.conn)?;
        self.hydrate(rows)
    }

    fn delete_conversation(&mut self, id: ConversationId) -> StoreResult<bool> {
        let deleted =
            diesel::delete(conversations::table.find(id.into_inner())).execute(self.conn)?;
        Ok(deleted > 0)
    }

    fn insert_chat_message(&mut self, message: &ChatMessage) -> StoreResult<()> {
        diesel::insert_into(chat_messages::table)
            .values(&chat_message_to_row(message))
            .execute(self.conn)?;
        Ok(())
    }

    fn update_chat_message(&mut self, message: &ChatMessage) -> StoreResult<()> {
        let updated = diesel::update(chat_messages::table.find(message.id().into_inner()))
            .set(chat_messages::body.eq(message.body()))
            .execute(self.conn)?;
        if updated == 0 {
            return Err(StoreError::not_found("chat message", message.id()));
        }
        Ok(())
    }

    fn find_chat_message(&mut self, id: ChatMessageId) -> StoreResult<Option<ChatMessage>> {
        chat_messages::table
            .find(id.into_inner())
            .select(ChatMessageRow::as_select())
            .first(self.conn)
            .optional()?
            .map(row_to_chat_message)
            .transpose()
    }

    fn delete_chat_message(&mut self, id: ChatMessageId) -> StoreResult<bool> {
        let deleted =
            diesel::delete(chat_messages::table.find(id.into_inner())).execute(self.conn)?;
        Ok(deleted > 0)
    }

    fn chat_messages_in(
        &mut self,
        conversation_id: ConversationId,
    ) -> StoreResult<Vec<ChatMessage>> {
        chat_messages::table
            .filter(chat_messages::conversation_id.eq(conversation_id.into_inner()))
            .order((chat_messages::sent_at.asc(), chat_messages::id.asc()))
            .select(ChatMessageRow::as_select())
            .load(self.conn)?
            .into_iter()
            .map(row_to_chat_message)
            .collect()
    }

    fn list_chat_messages(&mut self) -> StoreResult<Vec<ChatMessage>> {
        chat_messages::table
            .order((chat_messages::sent_at.asc(), chat_messages::id.asc()))
            .select(ChatMessageRow::as_select())
            .load(self.conn)?
            .into_iter()
            .map(row_to_chat_message)
            .collect()
    }

    fn insert_read_statuses(&mut self, statuses: &[MessageReadStatus]) -> StoreResult<usize> {
        let mut written = 0;
        for batch in statuses.chunks(READ_STATUS_BATCH) {
            let rows: Vec<ReadStatusRow> = batch.iter().map(read_status_to_row).collect();
            written += diesel::insert_into(message_read_statuses::table)
                .values(&rows)
                .on_conflict_do_nothing()
                .execute(self.conn)?;
        }
        Ok(written)
    }

    fn read_message_ids(
        &mut self,
        conversation_id: ConversationId,
        user: UserId,
    ) -> StoreResult<BTreeSet<ChatMessageId>> {
        let ids: Vec<Uuid> = message_read_statuses::table
            .inner_join(chat_messages::table)
            .filter(chat_messages::conversation_id.eq(conversation_id.into_inner()))
            .filter(message_read_statuses::user_id.eq(user.into_inner()))
            .select(message_read_statuses::message_id)
            .load(self.conn)?;
        Ok(ids.into_iter().map(ChatMessageId::from_uuid).collect())
    }
}
