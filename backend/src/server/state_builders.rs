//! Builders for the user store adapter and the HTTP state.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use tracing::{info, warn};

use user_service::domain::ports::UserStore;
use user_service::domain::{DateStream, UserRepository};
use user_service::inbound::http::state::HttpState;
use user_service::outbound::memory::MemoryUserStore;
use user_service::outbound::persistence::{DbPool, DieselUserStore, PoolConfig, run_migrations};
use user_service::outbound::templates::EmbeddedTemplates;
use user_service::settings::StoreBackend;

/// Build the store adapter selected by `backend`.
///
/// PostgreSQL stores are migrated first. An unreachable database only warns:
/// the pool connects on demand, so store routes answer 503 until the database
/// comes back while every other route keeps serving.
pub(crate) async fn build_user_store(
    backend: &StoreBackend,
    pool_max_size: u32,
    pool_timeout: Duration,
) -> Arc<dyn UserStore> {
    match backend {
        StoreBackend::Memory => {
            info!("using in-memory user store");
            Arc::new(MemoryUserStore::new())
        }
        StoreBackend::Postgres(url) => {
            if let Err(error) = run_migrations(url).await {
                warn!(%error, "database migrations not applied; store requests may fail");
            }
            let config = PoolConfig::new(url.as_str())
                .with_max_size(pool_max_size)
                .with_connection_timeout(pool_timeout);
            info!(max_size = config.max_size(), "using PostgreSQL user store");
            Arc::new(DieselUserStore::new(DbPool::new(&config)))
        }
    }
}

/// Reset the collection to the demo users; failures only warn.
pub(crate) async fn seed_users(users: &UserRepository) {
    if let Err(error) = users.init().await {
        warn!(%error, "seeding demo users failed; continuing without them");
    }
}

pub(crate) fn build_http_state(users: UserRepository) -> HttpState {
    HttpState::new(
        users,
        Arc::new(EmbeddedTemplates),
        DateStream::new(Arc::new(DefaultClock)),
    )
}
