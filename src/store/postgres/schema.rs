//! Diesel schema for the postbox tables.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Account identifier.
        id -> Uuid,
        /// Unique login name.
        #[max_length = 150]
        username -> Varchar,
        /// Email address.
        #[max_length = 254]
        email -> Varchar,
        /// Given name.
        #[max_length = 150]
        first_name -> Varchar,
        /// Family name.
        #[max_length = 150]
        last_name -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Direct messages.
    messages (id) {
        /// Message identifier.
        id -> Uuid,
        /// Author.
        sender_id -> Uuid,
        /// Recipient.
        receiver_id -> Uuid,
        /// Current content.
        content -> Text,
        /// Creation timestamp.
        sent_at -> Timestamptz,
        /// Whether the content was ever changed.
        edited -> Bool,
        /// Timestamp of the latest content change.
        last_edited_at -> Nullable<Timestamptz>,
        /// Message this one replies to.
        parent_id -> Nullable<Uuid>,
        /// Whether the receiver has read the message.
        is_read -> Bool,
    }
}

diesel::table! {
    /// Prior message contents, one row per edit.
    message_histories (id) {
        /// History entry identifier.
        id -> Uuid,
        /// Edited message.
        message_id -> Uuid,
        /// Content before the edit.
        old_content -> Text,
        /// Edit timestamp.
        edited_at -> Timestamptz,
        /// Editor, cleared when the account is deleted.
        edited_by -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Notices addressed to users.
    notifications (id) {
        /// Notification identifier.
        id -> Uuid,
        /// Recipient.
        user_id -> Uuid,
        /// Originating message, if any.
        message_id -> Nullable<Uuid>,
        /// Type tag.
        #[max_length = 20]
        notification_type -> Varchar,
        /// Text.
        content -> Text,
        /// Read flag.
        is_read -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Multi-participant conversations.
    conversations (id) {
        /// Conversation identifier.
        id -> Uuid,
        /// Title, possibly empty.
        #[max_length = 255]
        title -> Varchar,
        /// Active flag.
        is_active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Conversation membership.
    conversation_participants (conversation_id, user_id) {
        /// Conversation.
        conversation_id -> Uuid,
        /// Member.
        user_id -> Uuid,
    }
}

diesel::table! {
    /// Messages posted inside conversations.
    chat_messages (id) {
        /// Chat message identifier.
        id -> Uuid,
        /// Owning conversation.
        conversation_id -> Uuid,
        /// Author.
        sender_id -> Uuid,
        /// Body text.
        body -> Text,
        /// Payload kind.
        #[max_length = 10]
        message_type -> Varchar,
        /// Creation timestamp.
        sent_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user read markers for chat messages.
    message_read_statuses (message_id, user_id) {
        /// Chat message.
        message_id -> Uuid,
        /// Reader.
        user_id -> Uuid,
        /// When the message was read.
        read_at -> Timestamptz,
    }
}

diesel::joinable!(conversation_participants -> conversations (conversation_id));
diesel::joinable!(chat_messages -> conversations (conversation_id));
diesel::joinable!(message_read_statuses -> chat_messages (message_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    messages,
    message_histories,
    notifications,
    conversations,
    conversation_participants,
    chat_messages,
    message_read_statuses,
);
