//! The transactional store port.

use super::StoreError;
use crate::chat::ports::ChatRecords;
use crate::messaging::ports::MessageRecords;
use crate::user::ports::UserRecords;
use async_trait::async_trait;

/// Every record family reachable inside one transaction.
pub trait StoreTx: UserRecords + MessageRecords + ChatRecords {}

impl<T> StoreTx for T where T: UserRecords + MessageRecords + ChatRecords + ?Sized {}

/// A store able to run operations atomically.
///
/// Implementations commit the transaction when `operation` returns `Ok` and
/// roll back every write it made when it returns `Err`.
#[async_trait]
pub trait Store: Send + Sync {
    /// Runs `operation` inside one transaction.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `operation`, or a [`StoreError`]
    /// converted into `E` when the transaction cannot be started or
    /// committed.
    async fn transaction<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn StoreTx) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static;
}
