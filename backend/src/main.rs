//! Service entry-point: loads settings, connects the user store, and serves
//! the route table.

mod server;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_service::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let store = settings
        .store_backend()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let config = ServerConfig::new(bind_addr, store)
        .with_seed_on_startup(settings.seed_on_startup)
        .with_pool_limits(settings.pool_max_size(), settings.pool_timeout());
    info!(bind_addr = %config.bind_addr(), "starting user service");

    create_server(config).await?.await
}
