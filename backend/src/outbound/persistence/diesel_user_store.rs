//! PostgreSQL-backed `UserStore` implementation using Diesel.
//!
//! Saves are single-statement upserts (`INSERT .. ON CONFLICT (id) DO
//! UPDATE`), so PostgreSQL serialises concurrent writes to one identifier.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{Age, User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserStore`] port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserStoreError {
    UserStoreError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => UserStoreError::query("database query error"),
        DieselError::DeserializationError(_) => UserStoreError::query("unreadable user row"),
        _ => UserStoreError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserStoreError> {
    let age = u32::try_from(row.age)
        .map_err(|_| UserStoreError::query(format!("stored age {} is negative", row.age)))?;
    User::try_from_parts(Some(row.id), row.login, age)
        .map_err(|err| UserStoreError::query(format!("invalid stored user: {err}")))
}

fn age_for_db(age: Age) -> Result<i32, UserStoreError> {
    i32::try_from(age.get())
        .map_err(|_| UserStoreError::query(format!("age {} does not fit the column", age.get())))
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn save(&self, user: User) -> Result<User, UserStoreError> {
        let user = match user.id() {
            Some(_) => user,
            None => user.with_id(UserId::random()),
        };
        let id = user.id().ok_or_else(UserStoreError::missing_identifier)?;
        let row = NewUserRow {
            id: id.as_str(),
            login: user.login().as_ref(),
            age: age_for_db(user.age())?,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::id)
            .do_update()
            .set((
                users::login.eq(excluded(users::login)),
                users::age.eq(excluded(users::age)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(users::table.filter(users::id.eq(id.as_str())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn drop_all(&self) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(users::table)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
