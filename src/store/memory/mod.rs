//! In-memory store for tests and embedding.
//!
//! A transaction clones the whole state under the write lock, runs the
//! operation against the clone and swaps it in only on success, so a failing
//! hook leaves no partial writes behind.

mod chat;
mod messages;
mod users;

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use crate::chat::domain::{ChatMessage, ChatMessageId, Conversation, MessageReadStatus};
use crate::messaging::domain::{Message, MessageHistory, MessageId, Notification};
use crate::store::{Store, StoreError, StoreTx};
use crate::user::domain::{User, UserId};

/// Thread-safe in-memory store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

/// Every row of every table.
#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: Vec<User>,
    messages: Vec<Message>,
    histories: Vec<MessageHistory>,
    notifications: Vec<Notification>,
    conversations: Vec<Conversation>,
    chat_messages: Vec<ChatMessage>,
    read_statuses: BTreeMap<(ChatMessageId, UserId), MessageReadStatus>,
}

/// Transaction handle over a working copy of the state.
struct MemoryTx<'a> {
    state: &'a mut MemoryState,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn transaction<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn StoreTx) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
    {
        let mut guard = self
            .state
            .write()
            .map_err(|err| E::from(StoreError::connection(err.to_string())))?;
        let mut working = guard.clone();
        let outcome = operation(&mut MemoryTx {
            state: &mut working,
        });
        if outcome.is_ok() {
            *guard = working;
        }
        outcome
    }
}

impl MemoryState {
    fn has_user(&self, id: UserId) -> bool {
        self.users.iter().any(|user| user.id() == id)
    }

    fn has_message(&self, id: MessageId) -> bool {
        self.messages.iter().any(|message| message.id() == id)
    }

    /// Expands `roots` with every reply beneath them, at any depth.
    fn with_replies(&self, roots: Vec<MessageId>) -> BTreeSet<MessageId> {
        let mut doomed = BTreeSet::new();
        let mut pending = roots;
        while let Some(id) = pending.pop() {
            if doomed.insert(id) {
                pending.extend(
                    self.messages
                        .iter()
                        .filter(|message| message.parent() == Some(id))
                        .map(Message::id),
                );
            }
        }
        doomed
    }

    /// Removes messages together with their history and notifications.
    fn remove_messages(&mut self, doomed: &BTreeSet<MessageId>) {
        self.messages.retain(|message| !doomed.contains(&message.id()));
        self.histories.retain(|entry| !doomed.contains(&entry.message_id()));
        self.notifications.retain(|notification| {
            notification
                .message_id()
                .is_none_or(|message_id| !doomed.contains(&message_id))
        });
    }
}

/// Sorts rows by descending `(timestamp, id)` key, the same order the
/// `PostgreSQL` adapter asks for.
fn newest_first<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.sort_by(|left, right| key(right).cmp(&key(left)));
    rows
}

fn missing_reference(entity: &str, id: impl std::fmt::Display) -> StoreError {
    StoreError::InvalidReference(format!("{entity} {id} does not exist"))
}
