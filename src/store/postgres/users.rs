//! User rows. Cascades are enforced by the foreign keys in the migrations.

use super::conversion_helpers::{row_to_user, user_to_row};
use super::models::UserRow;
use super::schema::users;
use super::tx::PgTx;
use crate::store::StoreResult;
use crate::user::domain::{User, UserId, Username};
use crate::user::ports::UserRecords;
use diesel::prelude::*;

impl UserRecords for PgTx<'_> {
    fn insert_user(&mut self, user: &User) -> StoreResult<()> {
        diesel::insert_into(users::table)
            .values(&user_to_row(user))
            .execute(self.conn)?;
        Ok(())
    }

    fn find_user(&mut self, id: UserId) -> StoreResult<Option<User>> {
        users::table
            .find(id.into_inner())
            .select(UserRow::as_select())
            .first(self.conn)
            .optional()?
            .map(row_to_user)
            .transpose()
    }

    fn find_user_by_username(&mut self, username: &Username) -> StoreResult<Option<User>> {
        users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first(self.conn)
            .optional()?
            .map(row_to_user)
            .transpose()
    }

    fn find_users(&mut self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<uuid::Uuid> = ids.iter().copied().map(UserId::into_inner).collect();
        users::table
            .filter(users::id.eq_any(uuids))
            .order(users::created_at.asc())
            .select(UserRow::as_select())
            .load(self.conn)?
            .into_iter()
            .map(row_to_user)
            .collect()
    }

    fn delete_user(&mut self, id: UserId) -> StoreResult<bool> {
        let deleted = diesel::delete(users::table.find(id.into_inner())).execute(self.conn)?;
        Ok(deleted > 0)
    }
}
