//! `PostgreSQL` store backed by Diesel and an r2d2 pool.
//!
//! Record traits are implemented on a transaction handle borrowing the pooled
//! connection; [`PostgresStore::transaction`] opens a Diesel transaction on a
//! blocking thread and hands that handle to the caller's closure.

mod blocking_helpers;
mod chat;
mod conversion_helpers;
mod messages;
mod migrations;
mod models;
mod schema;
mod tx;
mod users;

pub use blocking_helpers::PgPool;
pub use migrations::{MIGRATIONS, apply_migrations};

use async_trait::async_trait;
use diesel::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::ConnectionManager;

use crate::config::DatabaseConfig;
use crate::store::{Store, StoreError, StoreResult, StoreTx};
use blocking_helpers::{get_conn, run_blocking_with};
use tx::PgTx;

/// Builds a connection pool from configuration.
///
/// # Errors
///
/// Returns [`StoreError::Connection`] when the pool cannot open its initial
/// connections.
pub fn build_pool(config: &DatabaseConfig) -> StoreResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(config.url());
    PgPool::builder()
        .max_size(config.pool_size())
        .connection_timeout(config.connect_timeout())
        .build(manager)
        .map_err(|err| StoreError::connection(err.to_string()))
}

/// `PostgreSQL`-backed store.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store from a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations on a pooled connection.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when no connection is available or a script
    /// fails.
    pub async fn migrate(&self) -> StoreResult<()> {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn(&pool)?;
                apply_migrations(&mut connection)
            },
            |err| StoreError::connection(format!("task join error: {err}")),
        )
        .await
    }
}

/// Error threaded through a Diesel transaction so the caller's own error
/// survives the rollback.
enum TxError<E> {
    Database(diesel::result::Error),
    Operation(E),
}

impl<E> From<diesel::result::Error> for TxError<E> {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err)
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn transaction<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn StoreTx) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut pooled = get_conn(&pool)?;
                let connection: &mut PgConnection = &mut pooled;
                connection
                    .transaction::<T, TxError<E>, _>(|conn| {
                        operation(&mut PgTx::new(conn)).map_err(TxError::Operation)
                    })
                    .map_err(|err| match err {
                        TxError::Operation(inner) => inner,
                        TxError::Database(db) => E::from(StoreError::from(db)),
                    })
            },
            |err| E::from(StoreError::connection(format!("task join error: {err}"))),
        )
        .await
    }
}
