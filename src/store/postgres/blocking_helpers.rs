//! Blocking operation helpers for the `PostgreSQL` store.
//!
//! Diesel is synchronous, so every transaction runs on tokio's blocking pool
//! to keep the async executor's worker threads free.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};

use crate::store::{StoreError, StoreResult};

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection type for internal use.
pub(super) type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Obtains a connection from the pool.
pub(super) fn get_conn(pool: &PgPool) -> StoreResult<PooledConn> {
    pool.get().map_err(|e| StoreError::connection(e.to_string()))
}

/// Runs a blocking task and maps join errors into the caller's error type.
pub(super) async fn run_blocking_with<F, T, E, M>(f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(tokio::task::JoinError) -> E + Send,
{
    tokio::task::spawn_blocking(f).await.map_err(map_err)?
}
