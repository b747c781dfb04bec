//! User accounts.
//!
//! - Domain types in [`domain`]
//! - Port contract in [`ports`]
//! - Registration and lookup in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
