//! HTTP route handlers for the server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Full-year calendar page
//! GET  /month?month=N          - Single month card fragment (HTMX)
//! POST /day/{day}              - Toggle a day's completion (returns fragment)
//! GET  /health                 - Health check
//!
//! # Google OAuth
//! GET  /auth/google/login      - Redirect to Google consent page
//! GET  /auth/google/callback   - Handle OAuth callback, reconcile identity
//! POST /auth/logout            - Unbind the session
//! ```

pub mod auth;
pub mod pages;
pub mod progress;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/google/login", get(auth::login))
        .route("/google/callback", get(auth::callback))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/month", get(pages::month))
        .route("/day/{day}", post(progress::toggle_day))
        .nest("/auth", auth_routes())
}
