//! Progress toggle route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use chrono::{Datelike, NaiveDate, Utc};
use tracing::instrument;

use setahun_core::{DayOfYear, passage};

use crate::db::ProgressRepository;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::routes::views::DayView;
use crate::state::AppState;

/// Single day item fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "day_item.html")]
pub struct DayItemTemplate {
    /// The day being rendered.
    pub day: DayView,
}

/// Toggle a day's completion and return the re-rendered day item.
///
/// # Route
///
/// `POST /day/{day}`
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn toggle_day(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(day): Path<u16>,
) -> Result<DayItemTemplate> {
    let day = DayOfYear::new(day)
        .ok_or_else(|| AppError::BadRequest(format!("invalid plan day: {day}")))?;

    let CurrentUser(user) = user;
    let record = ProgressRepository::new(state.pool())
        .toggle(user.id, day)
        .await?;

    // Resolve the ordinal back to a day of the month for display. Day 366
    // never gets here since the plan stops at 365.
    let year = Utc::now().year();
    let day_of_month = NaiveDate::from_yo_opt(year, u32::from(day.get()))
        .map_or(0, |date| date.day());

    let passage_text = state.plan().passage_for(day.get());

    Ok(DayItemTemplate {
        day: DayView {
            day: day_of_month,
            day_of_year: day.get(),
            completed: record.completed,
            links: passage::links_for(passage_text),
        },
    })
}
