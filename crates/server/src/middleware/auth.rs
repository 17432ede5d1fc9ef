//! Session binding and the current-user extractor.
//!
//! Every request resolves to a user row. A fresh visitor gets an anonymous
//! account created on the spot; a session bound to a deleted row (merged away
//! on another device, or a wiped database) is healed the same way rather than
//! erroring.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use setahun_core::UserId;

use crate::db::{RepositoryError, UserRepository};
use crate::error::AppError;
use crate::models::{User, session_keys};
use crate::state::AppState;

/// Resolve a session's bound user ID to a live user row.
///
/// Returns the user and whether the binding changed (a new anonymous account
/// was created, either because the session was unbound or because the bound
/// row no longer exists). The caller rebinds the session when it did.
///
/// # Errors
///
/// Returns `RepositoryError` if the lookup or the anonymous insert fails.
pub async fn resolve_bound_user(
    pool: &SqlitePool,
    bound: Option<UserId>,
) -> Result<(User, bool), RepositoryError> {
    let users = UserRepository::new(pool);

    if let Some(id) = bound {
        if let Some(user) = users.get_by_id(id).await? {
            return Ok((user, false));
        }
        tracing::warn!(user_id = %id, "session bound to missing user, creating a new one");
    }

    let user = users.create_anonymous().await?;
    Ok((user, true))
}

/// Extractor that resolves the request's user, creating one if needed.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.display_name())
/// }
/// ```
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Session is set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let bound: Option<UserId> = session.get(session_keys::USER_ID).await?;

        let (user, rebound) = resolve_bound_user(state.pool(), bound).await?;
        if rebound {
            bind_user(&session, user.id).await?;
        }

        crate::error::set_sentry_user(&user.id, user.email.as_deref());

        Ok(Self(user))
    }
}

/// Bind the session to a user ID.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn bind_user(
    session: &Session,
    user_id: UserId,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::USER_ID, user_id).await
}

/// Clear the session's user binding (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<UserId>(session_keys::USER_ID).await?;
    Ok(())
}
