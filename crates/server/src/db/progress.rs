//! Per-user reading progress repository.
//!
//! An absent row means "not completed"; the first toggle creates the row and
//! later toggles flip it in place. Rows are only ever deleted as part of a
//! user delete (merge cascade).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use setahun_core::{DayOfYear, UserId};

use super::RepositoryError;

/// A stored completion record for one plan day.
///
/// Invariant: `completed_at` is set iff `completed` is true.
#[derive(Debug, Clone)]
pub struct ProgressRecord {
    pub user_id: UserId,
    pub day_of_year: DayOfYear,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, sqlx::FromRow)]
struct ProgressRow {
    user_id: i64,
    day_of_year: i64,
    completed: bool,
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<ProgressRow> for ProgressRecord {
    type Error = RepositoryError;

    fn try_from(row: ProgressRow) -> Result<Self, Self::Error> {
        let day_of_year = DayOfYear::from_i64(row.day_of_year).ok_or_else(|| {
            RepositoryError::DataCorruption(format!(
                "day_of_year {} out of range in database",
                row.day_of_year
            ))
        })?;

        Ok(Self {
            user_id: UserId::new(row.user_id),
            day_of_year,
            completed: row.completed,
            completed_at: row.completed_at,
        })
    }
}

/// Repository for reading progress operations.
pub struct ProgressRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProgressRepository<'a> {
    /// Create a new progress repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// The set of completed day-of-year indices for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored day is out of range.
    pub async fn get_completed_days(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<u16>, RepositoryError> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT day_of_year FROM reading_progress WHERE user_id = ? AND completed = 1",
        )
        .bind(user_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|(day,)| {
                u16::try_from(day).map_err(|_| {
                    RepositoryError::DataCorruption(format!(
                        "day_of_year {day} out of range in database"
                    ))
                })
            })
            .collect()
    }

    /// Get the progress record for a single day, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_day(
        &self,
        user_id: UserId,
        day: DayOfYear,
    ) -> Result<Option<ProgressRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, ProgressRow>(
            "SELECT user_id, day_of_year, completed, completed_at \
             FROM reading_progress WHERE user_id = ? AND day_of_year = ?",
        )
        .bind(user_id.as_i64())
        .bind(day.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(ProgressRecord::try_from).transpose()
    }

    /// Write a day's completion state, creating the row if absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert(
        &self,
        user_id: UserId,
        day: DayOfYear,
        completed: bool,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO reading_progress (user_id, day_of_year, completed, completed_at) \
             VALUES (?, ?, ?, ?) \
             ON CONFLICT (user_id, day_of_year) DO UPDATE SET \
             completed = excluded.completed, completed_at = excluded.completed_at",
        )
        .bind(user_id.as_i64())
        .bind(day.as_i64())
        .bind(completed)
        .bind(completed_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Flip a day's completion state and return the new record.
    ///
    /// The read and the write are separate storage calls, so two concurrent
    /// toggles of the same day race under last-write-wins. That is the
    /// accepted semantics for a double-click, not a bug to lock around.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either storage call fails.
    pub async fn toggle(
        &self,
        user_id: UserId,
        day: DayOfYear,
    ) -> Result<ProgressRecord, RepositoryError> {
        let current = self.get_day(user_id, day).await?;
        let completed = current.is_none_or(|record| !record.completed);
        let completed_at = completed.then(Utc::now);

        self.upsert(user_id, day, completed, completed_at).await?;

        Ok(ProgressRecord {
            user_id,
            day_of_year: day,
            completed,
            completed_at,
        })
    }

    /// Number of completed days for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_completed(&self, user_id: UserId) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reading_progress WHERE user_id = ? AND completed = 1",
        )
        .bind(user_id.as_i64())
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
