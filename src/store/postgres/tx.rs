//! Transaction handle over a live `PostgreSQL` connection.

use diesel::PgConnection;

/// Borrowed connection inside an open Diesel transaction.
pub(super) struct PgTx<'a> {
    pub(super) conn: &'a mut PgConnection,
}

impl<'a> PgTx<'a> {
    pub(super) const fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }
}
