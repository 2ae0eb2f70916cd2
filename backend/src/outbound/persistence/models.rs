//! Internal Diesel row structs.
//!
//! These types are implementation details of the persistence layer and never
//! reach the domain.

use diesel::prelude::*;

use super::schema::users;

/// Row read from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub login: String,
    pub age: i32,
}

/// Row written on insert or upsert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub login: &'a str,
    pub age: i32,
}
