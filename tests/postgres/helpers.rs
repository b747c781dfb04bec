//! Shared test helpers for `PostgreSQL` integration tests.

use std::sync::{Arc, OnceLock};

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, TestCustomizer};
use mockable::DefaultClock;
use postbox::chat::services::{ChatMessageService, ConversationService};
use postbox::messaging::services::MessagingService;
use postbox::store::postgres::{PostgresStore, apply_migrations};
use postbox::user::domain::UserId;
use postbox::user::services::{RegisterUserRequest, UserService};
use uuid::Uuid;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the database used by these tests.
pub const DATABASE_URL_VAR: &str = "POSTBOX_TEST_DATABASE_URL";

static MIGRATED: OnceLock<Result<(), String>> = OnceLock::new();

/// Applies the schema once per test binary, outside any test transaction.
fn ensure_schema(url: &str) -> Result<(), BoxError> {
    MIGRATED
        .get_or_init(|| {
            let mut conn = PgConnection::establish(url).map_err(|err| err.to_string())?;
            apply_migrations(&mut conn).map_err(|err| err.to_string())
        })
        .clone()
        .map_err(BoxError::from)
}

/// Builds a store whose single pooled connection sits inside a test
/// transaction, or `None` when no test database is configured.
///
/// # Errors
///
/// Returns an error if migrations fail or the pool cannot connect.
pub fn test_store() -> Result<Option<PostgresStore>, BoxError> {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        return Ok(None);
    };
    ensure_schema(&url)?;
    let pool = Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(TestCustomizer))
        .build(ConnectionManager::<PgConnection>::new(url))?;
    Ok(Some(PostgresStore::new(pool)))
}

/// Every service wired to one transactional test store.
pub struct Services {
    pub store: Arc<PostgresStore>,
    pub users: UserService<PostgresStore, DefaultClock>,
    pub messaging: MessagingService<PostgresStore, DefaultClock>,
    pub conversations: ConversationService<PostgresStore, DefaultClock>,
    pub chat: ChatMessageService<PostgresStore, DefaultClock>,
}

impl Services {
    /// Wires services to `store`.
    #[must_use]
    pub fn new(store: PostgresStore) -> Self {
        let store = Arc::new(store);
        let clock = Arc::new(DefaultClock);
        Self {
            users: UserService::new(Arc::clone(&store), Arc::clone(&clock)),
            messaging: MessagingService::new(Arc::clone(&store), Arc::clone(&clock)),
            conversations: ConversationService::new(Arc::clone(&store), Arc::clone(&clock)),
            chat: ChatMessageService::new(Arc::clone(&store), clock),
            store,
        }
    }

    /// Registers a user with a unique username derived from `prefix`.
    ///
    /// Usernames stay unique across concurrently running tests so their
    /// uncommitted rows never contend on the unique index.
    pub async fn register(&self, prefix: &str) -> (UserId, String) {
        let username = format!("{prefix}_{}", Uuid::new_v4().simple());
        let user = self
            .users
            .register(RegisterUserRequest::new(
                username.as_str(),
                format!("{username}@example.com"),
                prefix,
                "Tester",
            ))
            .await
            .expect("registration should succeed");
        (user.id(), username)
    }
}

/// Returns wired services, or `None` when no test database is configured.
pub fn services() -> Option<Services> {
    test_store()
        .expect("test store setup should succeed")
        .map(Services::new)
}
