//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use user_service::outbound::persistence::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE};
use user_service::settings::StoreBackend;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: StoreBackend,
    pub(crate) seed_on_startup: bool,
    pub(crate) pool_max_size: u32,
    pub(crate) pool_timeout: Duration,
}

impl ServerConfig {
    /// Configuration serving `store` on `bind_addr`, seeding on startup.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, store: StoreBackend) -> Self {
        Self {
            bind_addr,
            store,
            seed_on_startup: true,
            pool_max_size: DEFAULT_MAX_SIZE,
            pool_timeout: DEFAULT_CONNECTION_TIMEOUT,
        }
    }

    /// Choose whether the demo users are written at startup.
    #[must_use]
    pub fn with_seed_on_startup(mut self, seed: bool) -> Self {
        self.seed_on_startup = seed;
        self
    }

    /// Bound the PostgreSQL pool; ignored by the in-memory store.
    #[must_use]
    pub fn with_pool_limits(mut self, max_size: u32, timeout: Duration) -> Self {
        self.pool_max_size = max_size;
        self.pool_timeout = timeout;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
