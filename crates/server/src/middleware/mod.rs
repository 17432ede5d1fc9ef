//! HTTP middleware stack for the server.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `SQLite` store)

pub mod auth;
pub mod session;

pub use auth::{CurrentUser, bind_user, clear_user, resolve_bound_user};
pub use session::create_session_layer;
