//! Shared world state for message hook BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use postbox::messaging::domain::Message;
use postbox::messaging::services::{MessagingError, MessagingService, UserDeletionReport};
use postbox::store::memory::InMemoryStore;
use postbox::user::domain::UserId;
use postbox::user::services::UserService;
use rstest::fixture;

/// Scenario world for message hook behaviour tests.
pub struct MessagingWorld {
    pub users: UserService<InMemoryStore, DefaultClock>,
    pub messaging: MessagingService<InMemoryStore, DefaultClock>,
    pub accounts: HashMap<String, UserId>,
    pub last_message: Option<Message>,
    pub last_error: Option<MessagingError>,
    pub deletion: Option<UserDeletionReport>,
}

impl MessagingWorld {
    /// Creates a world backed by an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            users: UserService::new(Arc::clone(&store), Arc::clone(&clock)),
            messaging: MessagingService::new(store, clock),
            accounts: HashMap::new(),
            last_message: None,
            last_error: None,
            deletion: None,
        }
    }

    /// Resolves a username registered earlier in the scenario.
    pub fn account(&self, username: &str) -> Result<UserId, eyre::Report> {
        self.accounts
            .get(username)
            .copied()
            .ok_or_else(|| eyre::eyre!("user {username} was not registered in this scenario"))
    }

    /// Returns the message the scenario is working with.
    pub fn message(&self) -> Result<&Message, eyre::Report> {
        self.last_message
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing message in scenario world"))
    }
}

impl Default for MessagingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> MessagingWorld {
    MessagingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
