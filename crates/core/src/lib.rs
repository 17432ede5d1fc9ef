//! Setahun Core - Domain logic for the one-year reading plan.
//!
//! This crate contains the pure parts of the tracker - no I/O, no database
//! access, no HTTP clients. The server crate layers persistence and transport
//! on top of it.
//!
//! # Modules
//!
//! - [`plan`] - The embedded 365-day reading plan, loaded once at startup
//! - [`passage`] - Expansion of abbreviated passage references into deep links
//! - [`calendar`] - Projection of a (year, month) pair onto plan days
//! - [`types`] - Newtype wrappers for user ids and day-of-year indices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod calendar;
pub mod passage;
pub mod plan;
pub mod types;

pub use calendar::{CalendarDay, CalendarMonth};
pub use passage::PassageLink;
pub use plan::{PlanCatalog, PlanError};
pub use types::{DayOfYear, PLAN_DAYS, UserId};
