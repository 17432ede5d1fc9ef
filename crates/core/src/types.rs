//! Newtype wrappers for entity identifiers and plan indices.

use serde::{Deserialize, Serialize};

/// Number of days in the fixed reading plan.
///
/// Leap-year day 366 is intentionally outside the plan; lookups for it
/// resolve to an empty passage.
pub const PLAN_DAYS: u16 = 365;

/// Internal user identifier.
///
/// Wraps the `i64` row id allocated by the storage layer. A user is either
/// anonymous (no external identity) or linked; the id itself never changes
/// when an anonymous user is promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Create a new ID from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// A validated 1-based day index into the reading plan.
///
/// Construction is the only place range checking happens; everything
/// downstream can assume `1..=365`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayOfYear(u16);

impl DayOfYear {
    /// Validate a raw day index. Returns `None` outside `1..=365`.
    #[must_use]
    pub const fn new(day: u16) -> Option<Self> {
        if day >= 1 && day <= PLAN_DAYS {
            Some(Self(day))
        } else {
            None
        }
    }

    /// Validate a raw storage-layer integer.
    #[must_use]
    pub const fn from_i64(day: i64) -> Option<Self> {
        if day >= 1 && day <= PLAN_DAYS as i64 {
            Some(Self(day as u16))
        } else {
            None
        }
    }

    /// Get the underlying day index.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Get the day index as the storage-layer integer type.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0 as i64
    }
}

impl std::fmt::Display for DayOfYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_of_year_accepts_plan_range() {
        assert_eq!(DayOfYear::new(1).map(|d| d.get()), Some(1));
        assert_eq!(DayOfYear::new(365).map(|d| d.get()), Some(365));
    }

    #[test]
    fn day_of_year_rejects_out_of_range() {
        assert!(DayOfYear::new(0).is_none());
        assert!(DayOfYear::new(366).is_none());
        assert!(DayOfYear::from_i64(-1).is_none());
        assert!(DayOfYear::from_i64(i64::MAX).is_none());
    }

    #[test]
    fn user_id_round_trips() {
        let id = UserId::new(42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(UserId::from(42), id);
        assert_eq!(id.to_string(), "42");
    }
}
