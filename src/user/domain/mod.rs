//! Domain model for user accounts.

mod error;
mod ids;
mod user;

pub use error::UserDomainError;
pub use ids::{EmailAddress, UserId, Username};
pub use user::{PersistedUserData, User, UserProfile};
