//! Diesel row structs. Persistence-only; converted to domain types at the
//! adapter boundary.

use diesel::prelude::*;

use crate::domain::{EntityId, User};

use super::schema::users;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub user_name: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: EntityId::new(row.id),
            user_name: row.user_name,
            password: row.password,
            first_name: row.first_name,
            last_name: row.last_name,
            age: row.age,
        }
    }
}

/// Insert and full-replace payload. The id column is never written, so
/// inserts take the next `SERIAL` value.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserWrite<'a> {
    pub user_name: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub age: i32,
}

impl<'a> From<&'a User> for UserWrite<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            user_name: &user.user_name,
            password: &user.password,
            first_name: &user.first_name,
            last_name: &user.last_name,
            age: user.age,
        }
    }
}
