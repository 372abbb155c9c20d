//! Generic repository port shared by every persisted entity.
//!
//! Business outcomes travel as `bool`; the error channel is reserved for
//! infrastructure failures so handlers can tell "nothing happened" apart from
//! "the store is broken".
use async_trait::async_trait;

use crate::domain::{Entity, EntityId};

use super::define_port_error;

define_port_error! {
    /// Infrastructure failures raised by repository adapters.
    pub enum RepositoryError {
        /// The store could not be reached or a connection could not be checked out.
        Connection { message: String } => "repository connection failed: {message}",
        /// A statement failed while executing.
        Query { message: String } => "repository query failed: {message}",
    }
}

/// Data access contract for one entity type.
///
/// Every mutation commits before returning; there is no transaction spanning
/// calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// All stored records ordered by display key ascending.
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError>;

    /// The record with `id`, or `None` when absent.
    async fn get_by_id(&self, id: EntityId) -> Result<Option<T>, RepositoryError>;

    /// Whether a record's display key matches `name` once both sides are
    /// trimmed and lowercased.
    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError>;

    /// Whether a record with `id` is stored.
    async fn exists_by_id(&self, id: EntityId) -> Result<bool, RepositoryError>;

    /// Insert `entity`, ignoring its identifier. `false` when nothing was stored.
    async fn create(&self, entity: &T) -> Result<bool, RepositoryError>;

    /// Replace the record keyed by `entity.id()`. `false` when no row changed.
    async fn update(&self, entity: &T) -> Result<bool, RepositoryError>;

    /// Remove the record keyed by `entity.id()`. `false` when no row was removed.
    async fn delete(&self, entity: &T) -> Result<bool, RepositoryError>;

    /// Flush pending work and report whether the store accepted it.
    async fn commit(&self) -> Result<bool, RepositoryError>;
}
