//! Persistence contract for user accounts.

use crate::store::StoreResult;
use crate::user::domain::{User, UserId, Username};

/// User rows reachable inside a store transaction.
pub trait UserRecords {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::Conflict`] when the identifier or
    /// username is already taken.
    fn insert_user(&mut self, user: &User) -> StoreResult<()>;

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns a store error when the lookup fails.
    fn find_user(&mut self, id: UserId) -> StoreResult<Option<User>>;

    /// Finds a user by exact username.
    ///
    /// # Errors
    ///
    /// Returns a store error when the lookup fails.
    fn find_user_by_username(&mut self, username: &Username) -> StoreResult<Option<User>>;

    /// Returns every user whose identifier appears in `ids`.
    ///
    /// Unknown identifiers are skipped, so callers compare lengths to detect
    /// invalid references.
    ///
    /// # Errors
    ///
    /// Returns a store error when the lookup fails.
    fn find_users(&mut self, ids: &[UserId]) -> StoreResult<Vec<User>>;

    /// Deletes a user and cascades to everything they own.
    ///
    /// Messages sent or received, notifications, conversation memberships,
    /// chat messages and read markers go with the user; history entries they
    /// authored on other users' messages keep existing without an editor.
    /// Returns `false` when no such user existed.
    ///
    /// # Errors
    ///
    /// Returns a store error when the delete fails.
    fn delete_user(&mut self, id: UserId) -> StoreResult<bool>;
}
