//! Domain model for multi-participant conversations and read tracking.

mod chat_message;
mod conversation;
mod error;
mod ids;
mod read_status;

pub use chat_message::{ChatMessage, ChatMessageType, PREVIEW_LENGTH, PersistedChatMessageData};
pub use conversation::{Conversation, PersistedConversationData};
pub use error::{ChatDomainError, ParseChatMessageTypeError};
pub use ids::{ChatMessageId, ConversationId};
pub use read_status::{MessageReadStatus, pending_read_statuses, unread_count};
