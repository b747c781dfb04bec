//! Direct messages, edit history and notifications.

use super::{MemoryTx, missing_reference, newest_first};
use crate::messaging::domain::{
    Message, MessageHistory, MessageId, Notification, NotificationId,
};
use crate::messaging::ports::MessageRecords;
use crate::store::{StoreError, StoreResult};
use crate::user::domain::UserId;

impl MessageRecords for MemoryTx<'_> {
    fn insert_message(&mut self, message: &Message) -> StoreResult<()> {
        if self.state.messages.iter().any(|row| row.id() == message.id()) {
            return Err(StoreError::Conflict(format!(
                "message {} already exists",
                message.id()
            )));
        }
        for user in [message.sender(), message.receiver()] {
            if !self.state.has_user(user) {
                return Err(missing_reference("user", user));
            }
        }
        if let Some(parent) = message.parent()
            && !self.state.has_message(parent)
        {
            return Err(missing_reference("message", parent));
        }
        self.state.messages.push(message.clone());
        Ok(())
    }

    fn update_message(&mut self, message: &Message) -> StoreResult<()> {
        let row = self
            .state
            .messages
            .iter_mut()
            .find(|row| row.id() == message.id())
            .ok_or_else(|| StoreError::not_found("message", message.id()))?;
        *row = message.clone();
        Ok(())
    }

    fn find_message(&mut self, id: MessageId) -> StoreResult<Option<Message>> {
        Ok(self.state.messages.iter().find(|row| row.id() == id).cloned())
    }

    fn delete_message(&mut self, id: MessageId) -> StoreResult<bool> {
        if !self.state.has_message(id) {
            return Ok(false);
        }
        let doomed = self.state.with_replies(vec![id]);
        self.state.remove_messages(&doomed);
        Ok(true)
    }

    fn messages_sent_by(&mut self, user: UserId) -> StoreResult<Vec<Message>> {
        let rows: Vec<Message> = self
            .state
            .messages
            .iter()
            .filter(|row| row.sender() == user)
            .cloned()
            .collect();
        Ok(newest_first(rows, |row| (row.sent_at(), row.id())))
    }

    fn messages_received_by(&mut self, user: UserId) -> StoreResult<Vec<Message>> {
        let rows: Vec<Message> = self
            .state
            .messages
            .iter()
            .filter(|row| row.receiver() == user)
            .cloned()
            .collect();
        Ok(newest_first(rows, |row| (row.sent_at(), row.id())))
    }

    fn replies_to(&mut self, parent: MessageId) -> StoreResult<Vec<Message>> {
        let mut rows: Vec<Message> = self
            .state
            .messages
            .iter()
            .filter(|row| row.parent() == Some(parent))
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.sent_at(), row.id()));
        Ok(rows)
    }

    fn insert_history(&mut self, entry: &MessageHistory) -> StoreResult<()> {
        if !self.state.has_message(entry.message_id()) {
            return Err(missing_reference("message", entry.message_id()));
        }
        if let Some(editor) = entry.edited_by()
            && !self.state.has_user(editor)
        {
            return Err(missing_reference("user", editor));
        }
        self.state.histories.push(entry.clone());
        Ok(())
    }

    fn history_for(&mut self, message_id: MessageId) -> StoreResult<Vec<MessageHistory>> {
        let rows: Vec<MessageHistory> = self
            .state
            .histories
            .iter()
            .filter(|entry| entry.message_id() == message_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |entry| (entry.edited_at(), entry.id())))
    }

    fn count_edits_by(&mut self, user: UserId) -> StoreResult<u64> {
        let count = self
            .state
            .histories
            .iter()
            .filter(|entry| entry.edited_by() == Some(user))
            .count();
        u64::try_from(count).map_err(|err| StoreError::serialization(err.to_string()))
    }

    fn insert_notification(&mut self, notification: &Notification) -> StoreResult<()> {
        if !self.state.has_user(notification.user_id()) {
            return Err(missing_reference("user", notification.user_id()));
        }
        if let Some(message_id) = notification.message_id()
            && !self.state.has_message(message_id)
        {
            return Err(missing_reference("message", message_id));
        }
        self.state.notifications.push(notification.clone());
        Ok(())
    }

    fn update_notification(&mut self, notification: &Notification) -> StoreResult<()> {
        let row = self
            .state
            .notifications
            .iter_mut()
            .find(|row| row.id() == notification.id())
            .ok_or_else(|| StoreError::not_found("notification", notification.id()))?;
        *row = notification.clone();
        Ok(())
    }

    fn find_notification(&mut self, id: NotificationId) -> StoreResult<Option<Notification>> {
        Ok(self
            .state
            .notifications
            .iter()
            .find(|row| row.id() == id)
            .cloned())
    }

    fn notifications_for(
        &mut self,
        user: UserId,
        unread_only: bool,
    ) -> StoreResult<Vec<Notification>> {
        let rows: Vec<Notification> = self
            .state
            .notifications
            .iter()
            .filter(|row| row.user_id() == user && (!unread_only || !row.is_read()))
            .cloned()
            .collect();
        Ok(newest_first(rows, |row| (row.created_at(), row.id())))
    }

    fn notifications_for_message(
        &mut self,
        message_id: MessageId,
    ) -> StoreResult<Vec<Notification>> {
        let rows: Vec<Notification> = self
            .state
            .notifications
            .iter()
            .filter(|row| row.message_id() == Some(message_id))
            .cloned()
            .collect();
        Ok(newest_first(rows, |row| (row.created_at(), row.id())))
    }
}
