//! Conversions between Diesel rows and domain values.

use super::models::{
    ChatMessageRow, ConversationRow, HistoryRow, MessageChangeset, MessageRow, NotificationRow,
    ReadStatusRow, UserRow,
};
use crate::chat::domain::{
    ChatMessage, ChatMessageId, ChatMessageType, Conversation, ConversationId, MessageReadStatus,
    PersistedChatMessageData, PersistedConversationData,
};
use crate::messaging::domain::{
    HistoryId, Message, MessageHistory, MessageId, Notification, NotificationId, NotificationType,
    PersistedMessageData, PersistedNotificationData,
};
use crate::store::{StoreError, StoreResult};
use crate::user::domain::{EmailAddress, PersistedUserData, User, UserId, Username};
use std::collections::BTreeSet;

pub(super) fn user_to_row(user: &User) -> UserRow {
    UserRow {
        id: user.id().into_inner(),
        username: user.username().as_str().to_owned(),
        email: user.email().as_str().to_owned(),
        first_name: user.first_name().to_owned(),
        last_name: user.last_name().to_owned(),
        created_at: user.created_at(),
    }
}

pub(super) fn row_to_user(row: UserRow) -> StoreResult<User> {
    let username =
        Username::new(row.username).map_err(|err| StoreError::serialization(err.to_string()))?;
    let email =
        EmailAddress::new(row.email).map_err(|err| StoreError::serialization(err.to_string()))?;
    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(row.id),
        username,
        email,
        first_name: row.first_name,
        last_name: row.last_name,
        created_at: row.created_at,
    }))
}

pub(super) fn message_to_row(message: &Message) -> MessageRow {
    MessageRow {
        id: message.id().into_inner(),
        sender_id: message.sender().into_inner(),
        receiver_id: message.receiver().into_inner(),
        content: message.content().to_owned(),
        sent_at: message.sent_at(),
        edited: message.is_edited(),
        last_edited_at: message.last_edited_at(),
        parent_id: message.parent().map(MessageId::into_inner),
        is_read: message.is_read(),
    }
}

pub(super) fn message_changeset(message: &Message) -> MessageChangeset {
    MessageChangeset {
        content: message.content().to_owned(),
        edited: message.is_edited(),
        last_edited_at: message.last_edited_at(),
        is_read: message.is_read(),
    }
}

pub(super) fn row_to_message(row: MessageRow) -> Message {
    Message::from_persisted(PersistedMessageData {
        id: MessageId::from_uuid(row.id),
        sender: UserId::from_uuid(row.sender_id),
        receiver: UserId::from_uuid(row.receiver_id),
        content: row.content,
        sent_at: row.sent_at,
        edited: row.edited,
        last_edited_at: row.last_edited_at,
        parent: row.parent_id.map(MessageId::from_uuid),
        read: row.is_read,
    })
}

pub(super) fn history_to_row(entry: &MessageHistory) -> HistoryRow {
    HistoryRow {
        id: entry.id().into_inner(),
        message_id: entry.message_id().into_inner(),
        old_content: entry.old_content().to_owned(),
        edited_at: entry.edited_at(),
        edited_by: entry.edited_by().map(UserId::into_inner),
    }
}

pub(super) fn row_to_history(row: HistoryRow) -> MessageHistory {
    MessageHistory::from_persisted(
        HistoryId::from_uuid(row.id),
        MessageId::from_uuid(row.message_id),
        row.old_content,
        row.edited_at,
        row.edited_by.map(UserId::from_uuid),
    )
}

pub(super) fn notification_to_row(notification: &Notification) -> NotificationRow {
    NotificationRow {
        id: notification.id().into_inner(),
        user_id: notification.user_id().into_inner(),
        message_id: notification.message_id().map(MessageId::into_inner),
        notification_type: notification.notification_type().as_str().to_owned(),
        content: notification.content().to_owned(),
        is_read: notification.is_read(),
        created_at: notification.created_at(),
    }
}

pub(super) fn row_to_notification(row: NotificationRow) -> StoreResult<Notification> {
    let notification_type = NotificationType::try_from(row.notification_type.as_str())
        .map_err(|err| StoreError::serialization(err.to_string()))?;
    Ok(Notification::from_persisted(PersistedNotificationData {
        id: NotificationId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        message_id: row.message_id.map(MessageId::from_uuid),
        notification_type,
        content: row.content,
        is_read: row.is_read,
        created_at: row.created_at,
    }))
}

pub(super) fn conversation_to_row(conversation: &Conversation) -> ConversationRow {
    ConversationRow {
        id: conversation.id().into_inner(),
        title: conversation.title().to_owned(),
        is_active: conversation.is_active(),
        created_at: conversation.created_at(),
        updated_at: conversation.updated_at(),
    }
}

pub(super) fn row_to_conversation(
    row: ConversationRow,
    participants: BTreeSet<UserId>,
) -> Conversation {
    Conversation::from_persisted(PersistedConversationData {
        id: ConversationId::from_uuid(row.id),
        title: row.title,
        participants,
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub(super) fn chat_message_to_row(message: &ChatMessage) -> ChatMessageRow {
    ChatMessageRow {
        id: message.id().into_inner(),
        conversation_id: message.conversation_id().into_inner(),
        sender_id: message.sender().into_inner(),
        body: message.body().to_owned(),
        message_type: message.message_type().as_str().to_owned(),
        sent_at: message.sent_at(),
    }
}

pub(super) fn row_to_chat_message(row: ChatMessageRow) -> StoreResult<ChatMessage> {
    let message_type = ChatMessageType::try_from(row.message_type.as_str())
        .map_err(|err| StoreError::serialization(err.to_string()))?;
    Ok(ChatMessage::from_persisted(PersistedChatMessageData {
        id: ChatMessageId::from_uuid(row.id),
        conversation_id: ConversationId::from_uuid(row.conversation_id),
        sender: UserId::from_uuid(row.sender_id),
        body: row.body,
        message_type,
        sent_at: row.sent_at,
    }))
}

pub(super) const fn read_status_to_row(status: &MessageReadStatus) -> ReadStatusRow {
    ReadStatusRow {
        message_id: status.message_id().into_inner(),
        user_id: status.user_id().into_inner(),
        read_at: status.read_at(),
    }
}
