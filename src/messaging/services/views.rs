//! Read models returned by the messaging service.

use crate::messaging::domain::{HistoryId, Message, MessageHistory, MessageId, Notification};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A message with its edit history, direct replies and the notifications it
/// raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageDetail {
    /// The message as currently stored.
    pub message: Message,
    /// Prior versions of the content, newest edit first.
    pub history: Vec<MessageHistory>,
    /// Direct replies, oldest first.
    pub replies: Vec<Message>,
    /// Notifications raised by the message, newest first.
    pub notifications: Vec<Notification>,
}

/// Every message of a reply thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageThread {
    /// The message the thread started from.
    pub root: Message,
    /// The root and every reply beneath it at any depth, oldest first.
    pub messages: Vec<Message>,
    /// Senders and receivers of the thread's messages.
    pub participants: Vec<UserId>,
}

/// Recent received messages and how many are unread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inbox {
    /// Received messages, newest first, capped at 50.
    pub messages: Vec<Message>,
    /// Received messages not yet read, across the whole account.
    pub unread_count: usize,
}

/// JSON-friendly dump of a message's edit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageHistoryView {
    /// The message identifier.
    pub message_id: MessageId,
    /// Content as currently stored.
    pub current_content: String,
    /// Whether the message was ever edited.
    pub edited: bool,
    /// When the last edit happened.
    pub last_edited_at: Option<DateTime<Utc>>,
    /// Prior versions, newest first.
    pub history: Vec<HistoryEntryView>,
}

/// One entry of a [`MessageHistoryView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntryView {
    /// The history entry identifier.
    pub history_id: HistoryId,
    /// Content before the edit.
    pub old_content: String,
    /// When the edit happened.
    pub edited_at: DateTime<Utc>,
    /// Username of the editor, or `None` once their account is gone.
    pub edited_by: Option<String>,
}

/// Messages a user sent and received, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserMessages {
    /// Messages the user sent.
    pub sent: Vec<Message>,
    /// Messages the user received.
    pub received: Vec<Message>,
}

/// Counts describing what an account holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDataSummary {
    /// Account username.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Messages the user sent.
    pub sent_messages_count: usize,
    /// Messages the user received.
    pub received_messages_count: usize,
    /// Sum of sent and received messages.
    pub total_messages: usize,
    /// Notifications addressed to the user.
    pub notifications_count: usize,
    /// Notifications not yet read.
    pub unread_notifications_count: usize,
    /// History entries the user authored.
    pub message_edits_count: u64,
    /// When the account was created.
    pub account_created: DateTime<Utc>,
}

/// What an account deletion removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDeletionReport {
    /// Username of the deleted account.
    pub username: String,
    /// Messages the user had sent.
    pub sent_messages_removed: usize,
    /// Messages the user had received.
    pub received_messages_removed: usize,
    /// Notifications addressed to the user.
    pub notifications_removed: usize,
}
