//! Direct messages between two users.
//!
//! Saving a message runs the hooks in [`hooks`]: a content change is
//! snapshotted into the edit history before the row is written, and a newly
//! created message notifies its receiver afterwards, all inside one store
//! transaction.
//!
//! - Domain types in [`domain`]
//! - Port contract in [`ports`]
//! - Save hooks in [`hooks`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod hooks;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
