//! Database operations for the server's `SQLite` store.
//!
//! ## Tables
//!
//! - `users` - Anonymous and linked identities
//! - `reading_progress` - Per-user completion records, keyed by
//!   `(user_id, day_of_year)`
//! - `tower_sessions` - Session storage (created by the session store)
//!
//! Migrations live in `crates/server/migrations/` and run at startup.

pub mod progress;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use progress::{ProgressRecord, ProgressRepository};
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// Creates the database file if missing and enables foreign keys so that a
/// user delete cascades to its progress rows.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string is invalid or the
/// connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
