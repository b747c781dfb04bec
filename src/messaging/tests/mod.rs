
use crate::store::memory::InMemoryStore;
use crate::store::Store;
use crate::user::domain::{User, UserProfile};
use mockable::DefaultClock;

/// Registers `username` directly in the store.
async fn seed_user(store: &InMemoryStore, username: &str) -> User {
    let profile = UserProfile::new(
        username,
        format!("{username}@example.com"),
        username,
        "Tester",
    )
    .expect("valid profile");
    let user = User::register(profile, &DefaultClock);
    let stored = user.clone();
    store
        .transaction(move |tx| tx.insert_user(&stored))
        .await
        .expect("user insert should succeed");
    user
}
