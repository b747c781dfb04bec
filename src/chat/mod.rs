//! Multi-participant conversations with per-user read tracking.
//!
//! Marking a conversation read writes one [`domain::MessageReadStatus`] per
//! message the reader did not author and has not read yet; unread counts are
//! derived from those markers rather than from a shared flag.
//!
//! - Domain types in [`domain`]
//! - Port contract in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;
