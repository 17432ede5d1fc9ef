//! Shared fixtures for database-backed tests.

#![allow(clippy::unwrap_used)]

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use setahun_server::services::auth::IdentityAssertion;

/// In-memory pool capped at one connection so every query sees the same
/// database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

/// A verified identity for a given subject.
#[allow(dead_code)]
pub fn assertion(google_id: &str) -> IdentityAssertion {
    IdentityAssertion {
        google_id: google_id.to_string(),
        email: Some(format!("{google_id}@example.com")),
        name: Some("Budi".to_string()),
    }
}
