//! Application services for conversations and chat messages.

mod conversations;
mod error;
mod messages;
mod views;

pub use conversations::{ConversationService, CreateConversationRequest, UpdateConversationRequest};
pub use error::{ChatError, ChatResult};
pub use messages::{ChatMessageService, SendChatMessageRequest};
pub use views::{ConversationSummary, LastMessageView, ParticipantView, UnreadMessages};

use crate::chat::domain::{Conversation, ConversationId};
use crate::store::StoreTx;
use crate::user::domain::{User, UserId};
use std::collections::BTreeSet;

fn load_conversation(tx: &mut dyn StoreTx, id: ConversationId) -> ChatResult<Conversation> {
    tx.find_conversation(id)?
        .ok_or(ChatError::ConversationNotFound(id))
}

fn load_user(tx: &mut dyn StoreTx, id: UserId) -> ChatResult<User> {
    tx.find_user(id)?.ok_or(ChatError::UserNotFound(id))
}

fn ensure_participant(conversation: &Conversation, user: UserId) -> ChatResult<()> {
    if conversation.is_participant(user) {
        Ok(())
    } else {
        Err(ChatError::NotParticipant {
            conversation_id: conversation.id(),
            user,
        })
    }
}

/// Loads every user in `ids`, failing with the identifiers that do not exist.
fn require_users(tx: &mut dyn StoreTx, ids: &BTreeSet<UserId>) -> ChatResult<Vec<User>> {
    let wanted: Vec<UserId> = ids.iter().copied().collect();
    let found = tx.find_users(&wanted)?;
    let invalid: Vec<UserId> = wanted
        .into_iter()
        .filter(|id| !found.iter().any(|user| user.id() == *id))
        .collect();
    if !invalid.is_empty() {
        return Err(ChatError::InvalidParticipants(invalid));
    }
    Ok(found)
}
