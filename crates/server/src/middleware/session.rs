//! Session middleware configuration.
//!
//! Sets up `SQLite`-backed sessions using tower-sessions. The session is the
//! only thing identifying a visitor, so the cookie is long-lived: an
//! anonymous reader's progress should survive a month away.

use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::ServerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "setahun_session";

/// Session expiry time in seconds (365 days, the length of the plan).
const SESSION_EXPIRY_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Create the session layer around an `SQLite` store.
///
/// The caller runs the store's migration before serving requests.
#[must_use]
pub fn create_session_layer(
    store: SqliteStore,
    config: &ServerConfig,
) -> SessionManagerLayer<SqliteStore> {
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
