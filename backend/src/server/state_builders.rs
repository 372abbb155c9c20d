//! Chooses repository adapters for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use migo_api::domain::User;
use migo_api::domain::ports::Repository;
use migo_api::inbound::http::state::HttpState;
use migo_api::outbound::memory::InMemoryRepository;
use migo_api::outbound::persistence::{DbPool, DieselUserRepository};

/// PostgreSQL when a pool is configured, otherwise a process-local store.
fn build_user_repository(pool: Option<&DbPool>) -> Arc<dyn Repository<User>> {
    match pool {
        Some(pool) => {
            info!("using PostgreSQL user repository");
            Arc::new(DieselUserRepository::new(pool.clone()))
        }
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            Arc::new(InMemoryRepository::<User>::new())
        }
    }
}

pub(super) fn build_http_state(pool: Option<&DbPool>) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(build_user_repository(pool)))
}
