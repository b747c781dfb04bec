//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use postbox::chat::services::{ChatMessageService, ConversationService};
use postbox::messaging::services::MessagingService;
use postbox::store::memory::InMemoryStore;
use postbox::user::domain::UserId;
use postbox::user::services::{RegisterUserRequest, UserService};
use rstest::fixture;

/// Every service wired to one shared in-memory store.
pub struct Services {
    pub users: UserService<InMemoryStore, DefaultClock>,
    pub messaging: MessagingService<InMemoryStore, DefaultClock>,
    pub conversations: ConversationService<InMemoryStore, DefaultClock>,
    pub chat: ChatMessageService<InMemoryStore, DefaultClock>,
}

impl Services {
    /// Registers a user named `username` with a derived email address.
    pub async fn register(&self, username: &str, first_name: &str, last_name: &str) -> UserId {
        self.users
            .register(RegisterUserRequest::new(
                username,
                format!("{username}@example.com"),
                first_name,
                last_name,
            ))
            .await
            .expect("registration should succeed")
            .id()
    }
}

/// Provides services over a fresh store for each test.
#[fixture]
pub fn services() -> Services {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(DefaultClock);
    Services {
        users: UserService::new(Arc::clone(&store), Arc::clone(&clock)),
        messaging: MessagingService::new(Arc::clone(&store), Arc::clone(&clock)),
        conversations: ConversationService::new(Arc::clone(&store), Arc::clone(&clock)),
        chat: ChatMessageService::new(store, clock),
    }
}
