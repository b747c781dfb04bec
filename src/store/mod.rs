//! Transactional persistence shared by the user, messaging and chat modules.
//!
//! Each module defines the record operations it needs as a port trait
//! ([`crate::user::ports::UserRecords`], [`crate::messaging::ports::MessageRecords`],
//! [`crate::chat::ports::ChatRecords`]). A [`Store`] hands a [`StoreTx`]
//! combining all three to a closure and commits or rolls back as a unit, so
//! message hooks run inside the same transaction as the save that fired them.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryStore`]: snapshot-and-swap storage for tests
//! - [`postgres::PostgresStore`]: Diesel over an r2d2 `PostgreSQL` pool

mod error;
pub mod memory;
pub mod ports;
pub mod postgres;

pub use error::{StoreError, StoreResult};
pub use ports::{Store, StoreTx};
