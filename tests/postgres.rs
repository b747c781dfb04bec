//! `PostgreSQL` integration tests for the Diesel store.
//!
//! Set `POSTBOX_TEST_DATABASE_URL` to run them; without it every test
//! returns early. Each test runs inside a Diesel test transaction that is
//! never committed.
//!
//! Tests are organized into modules by functionality:
//! - `messaging_tests`: Hooks, history and notifications
//! - `chat_tests`: Conversations and read tracking
//! - `cascade_tests`: Foreign-key cascades and constraint mapping

#![expect(clippy::expect_used, reason = "integration tests fail fast on setup errors")]

mod postgres {
    pub mod helpers;

    mod cascade_tests;
    mod chat_tests;
    mod messaging_tests;
}
