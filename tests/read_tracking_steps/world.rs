//! Shared world state for read tracking BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use eyre::WrapErr;
use mockable::DefaultClock;
use postbox::chat::domain::ConversationId;
use postbox::chat::services::{
    ChatError, ChatMessageService, ConversationService, SendChatMessageRequest,
};
use postbox::store::memory::InMemoryStore;
use postbox::user::domain::UserId;
use postbox::user::services::{RegisterUserRequest, UserService};
use rstest::fixture;

/// Scenario world for read tracking behaviour tests.
pub struct ReadTrackingWorld {
    pub users: UserService<InMemoryStore, DefaultClock>,
    pub conversations: ConversationService<InMemoryStore, DefaultClock>,
    pub chat: ChatMessageService<InMemoryStore, DefaultClock>,
    pub accounts: HashMap<String, UserId>,
    pub conversation: Option<ConversationId>,
    pub last_mark: Option<Result<usize, ChatError>>,
}

impl ReadTrackingWorld {
    /// Creates a world backed by an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            users: UserService::new(Arc::clone(&store), Arc::clone(&clock)),
            conversations: ConversationService::new(Arc::clone(&store), Arc::clone(&clock)),
            chat: ChatMessageService::new(store, clock),
            accounts: HashMap::new(),
            conversation: None,
            last_mark: None,
        }
    }

    /// Registers `username` and remembers its identifier.
    pub fn register(&mut self, username: &str) -> Result<UserId, eyre::Report> {
        let user = run_async(self.users.register(RegisterUserRequest::new(
            username,
            format!("{username}@example.com"),
            username,
            "Tester",
        )))
        .wrap_err("register scenario user")?;
        self.accounts.insert(username.to_owned(), user.id());
        Ok(user.id())
    }

    /// Resolves a username registered earlier in the scenario.
    pub fn account(&self, username: &str) -> Result<UserId, eyre::Report> {
        self.accounts
            .get(username)
            .copied()
            .ok_or_else(|| eyre::eyre!("user {username} was not registered in this scenario"))
    }

    /// Returns the conversation under test.
    pub fn conversation(&self) -> Result<ConversationId, eyre::Report> {
        self.conversation
            .ok_or_else(|| eyre::eyre!("missing conversation in scenario world"))
    }

    /// Posts `body` as `username` into the conversation under test.
    pub fn post(&self, username: &str, body: String) -> Result<(), eyre::Report> {
        let request =
            SendChatMessageRequest::new(self.account(username)?, self.conversation()?, body);
        run_async(self.chat.send(request)).wrap_err("post chat message")?;
        Ok(())
    }

    /// Marks the conversation under test as read for `username`.
    pub fn mark_read(&self, username: &str) -> Result<Result<usize, ChatError>, eyre::Report> {
        let reader = self.account(username)?;
        Ok(run_async(self.conversations.mark_read(self.conversation()?, reader)))
    }
}

impl Default for ReadTrackingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReadTrackingWorld {
    ReadTrackingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
