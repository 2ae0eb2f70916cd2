//! Service configuration loaded via OrthoConfig.
//!
//! Values layer command-line flags over `APP_*` environment variables over
//! configuration files; every field is optional and falls back to a local
//! development default.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

/// Store used when `store_url` is unset.
pub const DEFAULT_STORE_URL: &str = "postgres://localhost/user-service";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_POOL_MAX_SIZE: u32 = 10;
pub const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("store url `{url}` is invalid: {message}")]
    InvalidStoreUrl { url: String, message: String },
    #[error("store url scheme `{scheme}` is not supported; use postgres:// or memory://")]
    UnsupportedScheme { scheme: String },
    #[error("bind address `{value}` is invalid: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Backing store selected by the store URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Volatile in-process store (`memory://`).
    Memory,
    /// PostgreSQL database at the contained connection URL.
    Postgres(String),
}

impl StoreBackend {
    /// Classify `raw` by its URL scheme.
    ///
    /// # Examples
    /// ```
    /// use user_service::settings::StoreBackend;
    ///
    /// assert_eq!(StoreBackend::parse("memory://"), Ok(StoreBackend::Memory));
    /// assert!(matches!(
    ///     StoreBackend::parse("postgresql://db/users"),
    ///     Ok(StoreBackend::Postgres(_))
    /// ));
    /// ```
    ///
    /// # Errors
    /// [`SettingsError`] for unparsable URLs and unknown schemes.
    pub fn parse(raw: &str) -> Result<Self, SettingsError> {
        let url = Url::parse(raw).map_err(|err| SettingsError::InvalidStoreUrl {
            url: raw.to_owned(),
            message: err.to_string(),
        })?;
        match url.scheme() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres(raw.to_owned())),
            other => Err(SettingsError::UnsupportedScheme {
                scheme: other.to_owned(),
            }),
        }
    }
}

/// Runtime settings for the user service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APP")]
pub struct AppSettings {
    /// Connection string of the user store.
    pub store_url: Option<String>,
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Reset the collection to the demo users at startup.
    #[ortho_config(default = true)]
    pub seed_on_startup: bool,
    /// Upper bound on open PostgreSQL connections.
    pub pool_max_size: Option<u32>,
    /// Seconds a store request waits for a PostgreSQL connection.
    pub pool_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Return the configured store URL, falling back to the local default.
    pub fn store_url(&self) -> &str {
        self.store_url.as_deref().unwrap_or(DEFAULT_STORE_URL)
    }

    /// # Errors
    /// See [`StoreBackend::parse`].
    pub fn store_backend(&self) -> Result<StoreBackend, SettingsError> {
        StoreBackend::parse(self.store_url())
    }

    /// # Errors
    /// [`SettingsError::InvalidBindAddr`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS))
    }
}
