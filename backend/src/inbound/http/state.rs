//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the repository
//! port, so tests can swap in mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::User;
use crate::domain::ports::Repository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User store behind the `/users` routes.
    pub users: Arc<dyn Repository<User>>,
}

impl HttpState {
    /// Build state around a user repository.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use migo_api::domain::User;
    /// use migo_api::inbound::http::state::HttpState;
    /// use migo_api::outbound::memory::InMemoryRepository;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryRepository::<User>::new()));
    /// # let _ = state;
    /// ```
    #[must_use]
    pub fn new(users: Arc<dyn Repository<User>>) -> Self {
        Self { users }
    }
}
