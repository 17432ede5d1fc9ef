//! Calendar page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tracing::instrument;

use setahun_core::{PLAN_DAYS, calendar};

use crate::db::ProgressRepository;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::routes::views::MonthView;
use crate::state::AppState;

/// Full-year calendar page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Calendar year being displayed.
    pub year: i32,
    /// All twelve month cards.
    pub months: Vec<MonthView>,
    /// Header display name for the current reader.
    pub user_name: String,
    /// Whether the reader is signed in with Google.
    pub is_linked: bool,
    /// Whether the login button should render at all.
    pub login_enabled: bool,
    /// Completed readings across the whole plan.
    pub completed_total: usize,
    /// Total plan days, for the progress counter.
    pub plan_days: u16,
}

/// Single month card fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "month_card.html")]
pub struct MonthCardTemplate {
    /// The month being rendered.
    pub month: MonthView,
}

/// Query parameters for the month fragment.
///
/// The month arrives as text so that garbage input falls back to the
/// current month instead of failing the render.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// Month number, `1..=12`.
    pub month: Option<String>,
}

impl MonthQuery {
    fn month_or_current(&self) -> u32 {
        self.month
            .as_deref()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|month| (1..=12).contains(month))
            .unwrap_or_else(|| Utc::now().month())
    }
}

/// Display the full-year calendar.
///
/// # Route
///
/// `GET /`
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn index(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<IndexTemplate> {
    let CurrentUser(user) = user;
    let completed = ProgressRepository::new(state.pool())
        .get_completed_days(user.id)
        .await?;

    let year = Utc::now().year();
    let months = (1..=12)
        .map(|month| MonthView::from(calendar::project(year, month, &completed, state.plan())))
        .collect();

    Ok(IndexTemplate {
        year,
        months,
        user_name: user.display_name().to_string(),
        is_linked: user.is_linked(),
        login_enabled: state.google().is_some(),
        completed_total: completed.len(),
        plan_days: PLAN_DAYS,
    })
}

/// Display a single month card.
///
/// # Route
///
/// `GET /month?month=N`
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn month(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<MonthQuery>,
) -> Result<MonthCardTemplate> {
    let month = query.month_or_current();

    let CurrentUser(user) = user;
    let completed = ProgressRepository::new(state.pool())
        .get_completed_days(user.id)
        .await?;

    let year = Utc::now().year();
    let view = MonthView::from(calendar::project(year, month, &completed, state.plan()));

    Ok(MonthCardTemplate { month: view })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_query_falls_back_on_bad_input() {
        let current = Utc::now().month();

        let garbage = MonthQuery {
            month: Some("abc".to_string()),
        };
        assert_eq!(garbage.month_or_current(), current);

        let out_of_range = MonthQuery {
            month: Some("13".to_string()),
        };
        assert_eq!(out_of_range.month_or_current(), current);

        let missing = MonthQuery { month: None };
        assert_eq!(missing.month_or_current(), current);
    }

    #[test]
    fn month_query_accepts_valid_months() {
        let query = MonthQuery {
            month: Some("7".to_string()),
        };
        assert_eq!(query.month_or_current(), 7);
    }
}
