//! Postbox: direct messaging and group conversations on a transactional store.
//!
//! Direct messages carry an edit history and notify their receiver;
//! conversations track, per user and per message, what has been read.
//!
//! # Architecture
//!
//! Postbox follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Record traits each module needs from persistence
//! - **Adapters**: [`store::memory`] and [`store::postgres`]
//! - **Services**: Async orchestration returning classified errors
//!
//! Side effects that fire when a message is saved (history capture,
//! notifications, logging) are explicit [`messaging::hooks`] run by the save
//! routine inside the same transaction as the write.
//!
//! # Modules
//!
//! - [`user`]: Account registration and lookup
//! - [`messaging`]: Direct messages, edit history and notifications
//! - [`chat`]: Conversations, chat messages and read tracking
//! - [`store`]: Transactional persistence port and adapters

pub mod chat;
pub mod config;
pub mod error;
pub mod messaging;
pub mod store;
pub mod telemetry;
pub mod user;

pub use error::ErrorKind;
