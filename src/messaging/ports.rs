//! Persistence contract for direct messages, edit history and notifications.

use crate::messaging::domain::{
    Message, MessageHistory, MessageId, Notification, NotificationId,
};
use crate::store::StoreResult;
use crate::user::domain::UserId;

/// Direct-messaging rows reachable inside a store transaction.
///
/// Listing methods return newest rows first unless stated otherwise.
pub trait MessageRecords {
    /// Inserts a new message.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::InvalidReference`] when the sender,
    /// receiver or parent does not exist, or a conflict for a duplicate
    /// identifier.
    fn insert_message(&mut self, message: &Message) -> StoreResult<()>;

    /// Overwrites the mutable fields of an existing message.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::NotFound`] when the message is
    /// missing.
    fn update_message(&mut self, message: &Message) -> StoreResult<()>;

    /// Finds a message by identifier.
    ///
    /// # Errors
    ///
    /// Returns a store error when the lookup fails.
    fn find_message(&mut self, id: MessageId) -> StoreResult<Option<Message>>;

    /// Deletes a message with its replies, history and notifications.
    ///
    /// # Errors
    ///
    /// Returns a store error when the delete fails.
    fn delete_message(&mut self, id: MessageId) -> StoreResult<bool>;

    /// Lists messages sent by `user`.
    ///
    /// # Errors
    ///
    /// Returns a store error when the query fails.
    fn messages_sent_by(&mut self, user: UserId) -> StoreResult<Vec<Message>>;

    /// Lists messages received by `user`.
    ///
    /// # Errors
    ///
    /// Returns a store error when the query fails.
    fn messages_received_by(&mut self, user: UserId) -> StoreResult<Vec<Message>>;

    /// Lists direct replies to `parent`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a store error when the query fails.
    fn replies_to(&mut self, parent: MessageId) -> StoreResult<Vec<Message>>;

    /// Appends a history entry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::InvalidReference`] when the message
    /// or editor does not exist.
    fn insert_history(&mut self, entry: &MessageHistory) -> StoreResult<()>;

    /// Lists history entries of one message.
    ///
    /// # Errors
    ///
    /// Returns a store error when the query fails.
    fn history_for(&mut self, message_id: MessageId) -> StoreResult<Vec<MessageHistory>>;

    /// Counts history entries authored by `user`.
    ///
    /// # Errors
    ///
    /// Returns a store error when the query fails.
    fn count_edits_by(&mut self, user: UserId) -> StoreResult<u64>;

    /// Inserts a notification.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::InvalidReference`] when the
    /// recipient or message does not exist.
    fn insert_notification(&mut self, notification: &Notification) -> StoreResult<()>;

    /// Overwrites the read flag of an existing notification.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::NotFound`] when the notification
    /// is missing.
    fn update_notification(&mut self, notification: &Notification) -> StoreResult<()>;

    /// Finds a notification by identifier.
    ///
    /// # Errors
    ///
    /// Returns a store error when the lookup fails.
    fn find_notification(&mut self, id: NotificationId) -> StoreResult<Option<Notification>>;

    /// Lists notifications addressed to `user`, optionally only unread ones.
    ///
    /// # Errors
    ///
    /// Returns a store error when the query fails.
    fn notifications_for(
        &mut self,
        user: UserId,
        unread_only: bool,
    ) -> StoreResult<Vec<Notification>>;

    /// Lists notifications raised by one message.
    ///
    /// # Errors
    ///
    /// Returns a store error when the query fails.
    fn notifications_for_message(
        &mut self,
        message_id: MessageId,
    ) -> StoreResult<Vec<Notification>>;
}
