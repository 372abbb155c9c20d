//! PostgreSQL-backed `Repository<User>` using Diesel.
//!
//! Each mutation runs in its own transaction and reports whether any row was
//! affected. Name lookups trim and lowercase on the SQL side the same way
//! [`normalise_name`] does in Rust.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use tracing::debug;

use crate::domain::ports::{Repository, RepositoryError};
use crate::domain::{Entity, EntityId, User, normalise_name};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{UserRow, UserWrite};
use super::pool::DbPool;
use super::schema::users;

diesel::define_sql_function! {
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

diesel::define_sql_function! {
    fn btrim(x: diesel::sql_types::Text, characters: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Every character `str::trim` strips, so SQL-side trimming agrees with
/// [`normalise_name`].
const WHITESPACE: &str = "\t\n\u{b}\u{c}\r \u{85}\u{a0}\u{1680}\u{2000}\u{2001}\u{2002}\u{2003}\u{2004}\u{2005}\u{2006}\u{2007}\u{2008}\u{2009}\u{200a}\u{2028}\u{2029}\u{202f}\u{205f}\u{3000}";

/// Diesel-backed user repository.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Serve users from `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<User> for DieselUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order((
                lower(users::user_name).asc(),
                users::user_name.asc(),
                users::id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(User::from))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let normalised = normalise_name(name);
        diesel::select(diesel::dsl::exists(
            users::table.filter(lower(btrim(users::user_name, WHITESPACE)).eq(normalised)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn exists_by_id(&self, id: EntityId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(users::table.find(id.get())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn create(&self, entity: &User) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = UserWrite::from(entity);
        let affected = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    diesel::insert_into(users::table)
                        .values(&row)
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        debug!(kind = User::KIND, affected, "insert committed");
        Ok(affected > 0)
    }

    async fn update(&self, entity: &User) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = entity.id().get();
        let row = UserWrite::from(entity);
        let affected = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    diesel::update(users::table.find(id))
                        .set(&row)
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        debug!(kind = User::KIND, id, affected, "update committed");
        Ok(affected > 0)
    }

    async fn delete(&self, entity: &User) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = entity.id().get();
        let affected = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move { diesel::delete(users::table.find(id)).execute(conn).await }
                    .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        debug!(kind = User::KIND, id, affected, "delete committed");
        Ok(affected > 0)
    }

    async fn commit(&self) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, DieselError, _>(|_conn| async move { Ok(()) }.scope_boxed())
            .await
            .map_err(map_diesel_error)?;
        Ok(true)
    }
}
