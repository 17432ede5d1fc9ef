//! User repository for identity records.
//!
//! A user is anonymous until reconciliation links it to an external
//! identity. All single-row operations here are atomic at the storage
//! layer; the multi-row merge runs in one transaction.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use setahun_core::UserId;

use super::RepositoryError;
use crate::models::User;
use crate::services::auth::IdentityAssertion;

const USER_COLUMNS: &str = "id, google_id, email, name, created_at";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    google_id: Option<String>,
    email: Option<String>,
    name: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            google_id: row.google_id,
            email: row.email,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by their internal ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Get a user by their external (Google) identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_google_id(&self, google_id: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE google_id = ?"
        ))
        .bind(google_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Create a new anonymous user (no external identity).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_anonymous(&self) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (created_at) VALUES (?) RETURNING {USER_COLUMNS}"
        ))
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Create a new user already linked to an external identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including a
    /// unique violation on `google_id`).
    pub async fn create_linked(
        &self,
        assertion: &IdentityAssertion,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (google_id, email, name, created_at) \
             VALUES (?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(&assertion.google_id)
        .bind(&assertion.email)
        .bind(&assertion.name)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Link an anonymous user to an external identity, in place.
    ///
    /// The internal id and all progress records are untouched; only the
    /// identity fields change. The guard on `google_id IS NULL` makes this
    /// fail rather than clobber a row that was linked concurrently.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist or is
    /// no longer anonymous.
    pub async fn promote(
        &self,
        id: UserId,
        assertion: &IdentityAssertion,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET google_id = ?, email = ?, name = ? \
             WHERE id = ? AND google_id IS NULL",
        )
        .bind(&assertion.google_id)
        .bind(&assertion.email)
        .bind(&assertion.name)
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a user. Progress rows cascade away with it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Fold an anonymous user into a linked one, in a single transaction.
    ///
    /// Transfers every progress row the target does not already have a
    /// record for - the target's own history always wins, the merge is
    /// additive only. The source's remaining rows and its user row are then
    /// deleted. Safe to re-run: a repeat after a partial failure finds
    /// nothing left to transfer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction fails; no
    /// partial state is left behind.
    pub async fn merge_into(&self, target: UserId, source: UserId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE reading_progress SET user_id = ?1 \
             WHERE user_id = ?2 AND day_of_year NOT IN \
             (SELECT day_of_year FROM reading_progress WHERE user_id = ?1)",
        )
        .bind(target.as_i64())
        .bind(source.as_i64())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM reading_progress WHERE user_id = ?")
            .bind(source.as_i64())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(source.as_i64())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
