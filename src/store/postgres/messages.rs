//! Direct messages, edit history and notifications.

use super::conversion_helpers::{
    history_to_row, message_changeset, message_to_row, notification_to_row, row_to_history,
    row_to_message, row_to_notification,
};
use super::models::{HistoryRow, MessageRow, NotificationRow};
use super::schema::{message_histories, messages, notifications};
use super::tx::PgTx;
use crate::messaging::domain::{
    Message, MessageHistory, MessageId, Notification, NotificationId,
};
use crate::messaging::ports::MessageRecords;
use crate::store::{StoreError, StoreResult};
use crate::user::domain::UserId;
use diesel::prelude::*;

impl MessageRecords for PgTx<'_> {
    fn insert_message(&mut self, message: &Message) -> StoreResult<()> {
        diesel::insert_into(messages::table)
            .values(&message_to_row(message))
            .execute(self.conn)?;
        Ok(())
    }

    fn update_message(&mut self, message: &Message) -> StoreResult<()> {
        let updated = diesel::update(messages::table.find(message.id().into_inner()))
            .set(&message_changeset(message))
            .execute(self.conn)?;
        if updated == 0 {
            return Err(StoreError::not_found("message", message.id()));
        }
        Ok(())
    }

    fn find_message(&mut self, id: MessageId) -> StoreResult<Option<Message>> {
        let row = messages::table
            .find(id.into_inner())
            .select(MessageRow::as_select())
            .first(self.conn)
            .optional()?;
        Ok(row.map(row_to_message))
    }

    fn delete_message(&mut self, id: MessageId) -> StoreResult<bool> {
        let deleted = diesel::delete(messages::table.find(id.into_inner())).execute(self.conn)?;
        Ok(deleted > 0)
    }

    fn messages_sent_by(&mut self, user: UserId) -> StoreResult<Vec<Message>> {
        let rows = messages::table
            .filter(messages::sender_id.eq(user.into_inner()))
            .order((messages::sent_at.desc(), messages::id.desc()))
            .select(MessageRow::as_select())
            .load(self.conn)?;
        Ok(rows.into_iter().map(row_to_message).collect())
    }

    fn messages_received_by(&mut self, user: UserId) -> StoreResult<Vec<Message>> {
        let rows = messages::table
            .filter(messages::receiver_id.eq(user.into_inner()))
            .order((messages::sent_at.desc(), messages::id.desc()))
            .select(MessageRow::as_select())
            .load(self.conn)?;
        Ok(rows.into_iter().map(row_to_message).collect())
    }

    fn replies_to(&mut self, parent: MessageId) -> StoreResult<Vec<Message>> {
        let rows = messages::table
            .filter(messages::parent_id.eq(parent.into_inner()))
            .order((messages::sent_at.asc(), messages::id.asc()))
            .select(MessageRow::as_select())
            .load(self.conn)?;
        Ok(rows.into_iter().map(row_to_message).collect())
    }

    fn insert_history(&mut self, entry: &MessageHistory) -> StoreResult<()> {
        diesel::insert_into(message_histories::table)
            .values(&history_to_row(entry))
            .execute(self.conn)?;
        Ok(())
    }

    fn history_for(&mut self, message_id: MessageId) -> StoreResult<Vec<MessageHistory>> {
        let rows = message_histories::table
            .filter(message_histories::message_id.eq(message_id.into_inner()))
            .order((message_histories::edited_at.desc(), message_histories::id.desc()))
            .select(HistoryRow::as_select())
            .load(self.conn)?;
        Ok(rows.into_iter().map(row_to_history).collect())
    }

    fn count_edits_by(&mut self, user: UserId) -> StoreResult<u64> {
        let count: i64 = message_histories::table
            .filter(message_histories::edited_by.eq(user.into_inner()))
            .count()
            .get_result(self.conn)?;
        u64::try_from(count).map_err(|err| StoreError::serialization(err.to_string()))
    }

    fn insert_notification(&mut self, notification: &Notification) -> StoreResult<()> {
        diesel::insert_into(notifications::table)
            .values(&notification_to_row(notification))
            .execute(self.conn)?;
        Ok(())
    }

    fn update_notification(&mut self, notification: &Notification) -> StoreResult<()> {
        let updated = diesel::update(notifications::table.find(notification.id().into_inner()))
            .set(notifications::is_read.eq(notification.is_read()))
            .execute(self.conn)?;
        if updated == 0 {
            return Err(StoreError::not_found("notification", notification.id()));
        }
        Ok(())
    }

    fn find_notification(&mut self, id: NotificationId) -> StoreResult<Option<Notification>> {
        notifications::table
            .find(id.into_inner())
            .select(NotificationRow::as_select())
            .first(self.conn)
            .optional()?
            .map(row_to_notification)
            .transpose()
    }

    fn notifications_for(
        &mut self,
        user: UserId,
        unread_only: bool,
    ) -> StoreResult<Vec<Notification>> {
        let mut query = notifications::table
            .filter(notifications::user_id.eq(user.into_inner()))
            .order((notifications::created_at.desc(), notifications::id.desc()))
            .select(NotificationRow::as_select())
            .into_boxed();
        if unread_only {
            query = query.filter(notifications::is_read.eq(false));
        }
        query
            .load(self.conn)?
            .into_iter()
            .map(row_to_notification)
            .collect()
    }

    fn notifications_for_message(
        &mut self,
        message_id: MessageId,
    ) -> StoreResult<Vec<Notification>> {
        notifications::table
            .filter(notifications::message_id.eq(message_id.into_inner()))
            .order((notifications::created_at.desc(), notifications::id.desc()))
            .select(NotificationRow::as_select())
            .load(self.conn)?
            .into_iter()
            .map(row_to_notification)
            .collect()
    }
}
