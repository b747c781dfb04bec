//! Diesel row models.

use super::schema::{
    chat_messages, conversation_participants, conversations, message_histories,
    message_read_statuses, messages, notifications, users,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Row of the `users` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Account identifier.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row of the `messages` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageRow {
    /// Message identifier.
    pub id: Uuid,
    /// Author.
    pub sender_id: Uuid,
    /// Recipient.
    pub receiver_id: Uuid,
    /// Current content.
    pub content: String,
    /// Creation timestamp.
    pub sent_at: DateTime<Utc>,
    /// Edited flag.
    pub edited: bool,
    /// Latest edit timestamp.
    pub last_edited_at: Option<DateTime<Utc>>,
    /// Parent message.
    pub parent_id: Option<Uuid>,
    /// Read flag.
    pub is_read: bool,
}

/// Changeset written when a message is updated.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = messages)]
#[diesel(treat_none_as_null = true)]
pub struct MessageChangeset {
    /// Current content.
    pub content: String,
    /// Edited flag.
    pub edited: bool,
    /// Latest edit timestamp.
    pub last_edited_at: Option<DateTime<Utc>>,
    /// Read flag.
    pub is_read: bool,
}

/// Row of the `message_histories` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = message_histories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HistoryRow {
    /// Entry identifier.
    pub id: Uuid,
    /// Edited message.
    pub message_id: Uuid,
    /// Content before the edit.
    pub old_content: String,
    /// Edit timestamp.
    pub edited_at: DateTime<Utc>,
    /// Editor.
    pub edited_by: Option<Uuid>,
}

/// Row of the `notifications` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    /// Notification identifier.
    pub id: Uuid,
    /// Recipient.
    pub user_id: Uuid,
    /// Originating message.
    pub message_id: Option<Uuid>,
    /// Type tag.
    pub notification_type: String,
    /// Text.
    pub content: String,
    /// Read flag.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row of the `conversations` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = conversations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ConversationRow {
    /// Conversation identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Active flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row of the `conversation_participants` table.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = conversation_participants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ParticipantRow {
    /// Conversation.
    pub conversation_id: Uuid,
    /// Member.
    pub user_id: Uuid,
}

/// Row of the `chat_messages` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = chat_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatMessageRow {
    /// Chat message identifier.
    pub id: Uuid,
    /// Owning conversation.
    pub conversation_id: Uuid,
    /// Author.
    pub sender_id: Uuid,
    /// Body text.
    pub body: String,
    /// Payload kind.
    pub message_type: String,
    /// Creation timestamp.
    pub sent_at: DateTime<Utc>,
}

/// Row of the `message_read_statuses` table.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = message_read_statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReadStatusRow {
    /// Chat message.
    pub message_id: Uuid,
    /// Reader.
    pub user_id: Uuid,
    /// Read timestamp.
    pub read_at: DateTime<Utc>,
}
