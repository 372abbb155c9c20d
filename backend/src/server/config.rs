//! HTTP server configuration object.

use std::net::SocketAddr;

use migo_api::middleware::BasicAuth;
use migo_api::outbound::persistence::DbPool;

/// Builder-style configuration for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) auth: BasicAuth,
}

impl ServerConfig {
    /// Listen on `bind_addr` with the in-memory store and no authentication.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            auth: BasicAuth::disabled(),
        }
    }

    /// Back the repositories with PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Require Basic credentials on the `/api` scope.
    #[must_use]
    pub fn with_auth(mut self, auth: BasicAuth) -> Self {
        self.auth = auth;
        self
    }

    /// Address the server listens on.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
