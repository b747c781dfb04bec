//! Embedded SQL migrations.

use diesel::PgConnection;
use diesel::connection::SimpleConnection;

use crate::store::{StoreError, StoreResult};

/// Ordered `(name, up.sql)` pairs shipped with the crate.
pub const MIGRATIONS: &[(&str, &str)] = &[
    (
        "2026-10-01-000000_create_accounts_and_messages",
        include_str!("../../../migrations/2026-10-01-000000_create_accounts_and_messages/up.sql"),
    ),
    (
        "2026-10-01-000001_create_conversations",
        include_str!("../../../migrations/2026-10-01-000001_create_conversations/up.sql"),
    ),
    (
        "2026-10-01-000002_add_message_threads_and_read_flags",
        include_str!(
            "../../../migrations/2026-10-01-000002_add_message_threads_and_read_flags/up.sql"
        ),
    ),
];

/// Applies every migration in order. Each script is idempotent.
///
/// # Errors
///
/// Returns [`StoreError::Persistence`] when a script fails.
pub fn apply_migrations(conn: &mut PgConnection) -> StoreResult<()> {
    for (name, sql) in MIGRATIONS {
        conn.batch_execute(sql).map_err(StoreError::persistence)?;
        tracing::debug!(migration = %name, "applied migration");
    }
    Ok(())
}
