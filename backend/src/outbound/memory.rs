//! Process-local repository used when no database URL is configured.
//!
//! Records live in a `BTreeMap` behind a lock; identifiers are handed out from
//! a counter starting at 1 and are never reused. Listings sort names without
//! regard to case.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{Repository, RepositoryError};
use crate::domain::{Entity, EntityId, normalise_name};

#[derive(Debug)]
struct Store<T> {
    next_id: i32,
    records: BTreeMap<EntityId, T>,
}

/// In-memory implementation of [`Repository`] for any entity.
///
/// # Examples
/// ```
/// use migo_api::domain::{User, ports::Repository};
/// use migo_api::outbound::memory::InMemoryRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryRepository::<User>::new();
/// assert!(repo.create(&User::new("Bob", "p", "a", "b")).await.unwrap());
/// assert!(repo.exists_by_name(" bob ").await.unwrap());
/// # });
/// ```
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    store: RwLock<Store<T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Empty store; the first insert receives id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                next_id: 1,
                records: BTreeMap::new(),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Store<T>> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Store<T>> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        let mut records: Vec<T> = self.read().records.values().cloned().collect();
        records.sort_by_cached_key(|record| {
            let key = record.display_key();
            (key.map(normalise_name), key.map(str::to_owned), record.id())
        });
        Ok(records)
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Option<T>, RepositoryError> {
        Ok(self.read().records.get(&id).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let wanted = normalise_name(name);
        Ok(self
            .read()
            .records
            .values()
            .filter_map(Entity::display_key)
            .any(|key| normalise_name(key) == wanted))
    }

    async fn exists_by_id(&self, id: EntityId) -> Result<bool, RepositoryError> {
        Ok(self.read().records.contains_key(&id))
    }

    async fn create(&self, entity: &T) -> Result<bool, RepositoryError> {
        let mut store = self.write();
        let id = EntityId::new(store.next_id);
        let Some(next) = store.next_id.checked_add(1) else {
            return Err(RepositoryError::query("identifier space exhausted"));
        };
        store.next_id = next;
        store.records.insert(id, entity.clone().with_id(id));
        debug!(kind = T::KIND, %id, "stored record");
        Ok(true)
    }

    async fn update(&self, entity: &T) -> Result<bool, RepositoryError> {
        let mut store = self.write();
        match store.records.get_mut(&entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, entity: &T) -> Result<bool, RepositoryError> {
        Ok(self.write().records.remove(&entity.id()).is_some())
    }

    async fn commit(&self) -> Result<bool, RepositoryError> {
        Ok(true)
    }
}
