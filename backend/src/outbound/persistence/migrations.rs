//! Embedded schema migrations.
//!
//! The SQL under `backend/migrations` is compiled into the binary and applied
//! over a short-lived synchronous connection before the pool starts serving.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations from the `backend/migrations` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply every pending migration to the database at `database_url`.
///
/// Blocks the calling thread; async callers should go through
/// [`run_migrations_blocking`].
///
/// # Errors
/// Returns [`MigrationError`] when the connection or a migration fails.
pub fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    info!(count = applied.len(), "database migrations applied");
    Ok(())
}

/// Run [`run_migrations`] on tokio's blocking pool.
///
/// # Errors
/// Returns [`MigrationError`] when migrating fails or the blocking task
/// panics.
pub async fn run_migrations_blocking(database_url: String) -> Result<(), MigrationError> {
    tokio::task::spawn_blocking(move || run_migrations(&database_url))
        .await
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?
}
