//! Embedded schema migrations.
//!
//! Diesel's migration harness needs a synchronous connection, so migrations are
//! applied on a blocking thread before the async pool is built.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::UserStoreError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply all pending migrations to the database at `database_url`.
///
/// # Errors
/// [`UserStoreError::Connection`] when the database cannot be reached and
/// [`UserStoreError::Query`] when a migration fails.
pub async fn run_migrations(database_url: &str) -> Result<(), UserStoreError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || apply_migrations(&url))
        .await
        .map_err(|err| UserStoreError::query(format!("migration task failed: {err}")))?
}

fn apply_migrations(database_url: &str) -> Result<(), UserStoreError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| UserStoreError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| UserStoreError::query(format!("migration: {err}")))?;
    info!(applied = applied.len(), "database migrations applied");
    Ok(())
}
