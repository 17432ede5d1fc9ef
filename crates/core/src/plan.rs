//! The embedded 365-day reading plan.
//!
//! The plan is a deployment-time artifact: it ships inside the binary and is
//! parsed exactly once at startup. A missing or malformed plan is a build
//! problem, so [`PlanCatalog::load`] failing should abort the process rather
//! than be handled as a runtime error.

use std::collections::HashMap;

use thiserror::Error;

use crate::types::PLAN_DAYS;

/// Raw plan data, keyed by day-of-year as a plain integer string ("1".."365").
static PLAN_JSON: &str = include_str!("plan.json");

/// Errors detected while loading the embedded plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The embedded JSON is malformed.
    #[error("invalid plan data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A day in `1..=365` has no entry.
    #[error("plan is missing day {0}")]
    MissingDay(u16),

    /// A day maps to an empty passage.
    #[error("plan has an empty passage for day {0}")]
    EmptyPassage(u16),
}

/// Immutable mapping from day-of-year to a passage reference string.
///
/// Constructed once at process start and shared by reference; it is never
/// mutated afterwards, so concurrent reads need no synchronization.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    passages: Vec<String>,
}

impl PlanCatalog {
    /// Load and validate the embedded plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanError` if the data is malformed or any of the 365 days
    /// is missing or empty. Callers are expected to treat this as fatal.
    pub fn load() -> Result<Self, PlanError> {
        Self::from_json(PLAN_JSON)
    }

    fn from_json(raw: &str) -> Result<Self, PlanError> {
        let map: HashMap<String, String> = serde_json::from_str(raw)?;

        let mut passages = Vec::with_capacity(usize::from(PLAN_DAYS));
        for day in 1..=PLAN_DAYS {
            let passage = map
                .get(&day.to_string())
                .ok_or(PlanError::MissingDay(day))?;
            if passage.trim().is_empty() {
                return Err(PlanError::EmptyPassage(day));
            }
            passages.push(passage.clone());
        }

        Ok(Self { passages })
    }

    /// Look up the passage reference for a day of the year.
    ///
    /// Returns the empty string for any index outside `1..=365`, including
    /// leap-year day 366 (the fixed plan has no reading for it).
    #[must_use]
    pub fn passage_for(&self, day_of_year: u16) -> &str {
        if day_of_year == 0 {
            return "";
        }
        self.passages
            .get(usize::from(day_of_year) - 1)
            .map_or("", String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_plan_day_has_a_passage() {
        let catalog = PlanCatalog::load().expect("embedded plan loads");
        for day in 1..=PLAN_DAYS {
            assert!(
                !catalog.passage_for(day).is_empty(),
                "day {day} has no passage"
            );
        }
    }

    #[test]
    fn out_of_range_days_resolve_to_empty() {
        let catalog = PlanCatalog::load().expect("embedded plan loads");
        assert_eq!(catalog.passage_for(0), "");
        assert_eq!(catalog.passage_for(366), "");
        assert_eq!(catalog.passage_for(u16::MAX), "");
    }

    #[test]
    fn plan_starts_and_ends_on_the_canon() {
        let catalog = PlanCatalog::load().expect("embedded plan loads");
        assert!(catalog.passage_for(1).starts_with("Kej. 1"));
        assert!(catalog.passage_for(365).starts_with("Why."));
    }

    #[test]
    fn missing_day_is_rejected() {
        let err = PlanCatalog::from_json(r#"{"1": "Kej. 1-3"}"#).unwrap_err();
        assert!(matches!(err, PlanError::MissingDay(2)));
    }

    #[test]
    fn empty_passage_is_rejected() {
        let mut entries: Vec<String> = (1..=PLAN_DAYS)
            .map(|d| format!(r#""{d}": "Kej. {d}""#))
            .collect();
        entries[0] = r#""1": "  ""#.to_string();
        let raw = format!("{{{}}}", entries.join(","));
        let err = PlanCatalog::from_json(&raw).unwrap_err();
        assert!(matches!(err, PlanError::EmptyPassage(1)));
    }
}
