//! Google OAuth route handlers.
//!
//! Handles the OAuth flow for Google sign-in:
//! - Login: Redirects to Google's consent page
//! - Callback: Verifies state, exchanges the code, reconciles the identity
//! - Logout: Unbinds the session and redirects home
//!
//! The callback rebinds the session only after reconciliation has fully
//! committed; any earlier failure leaves the session on its current account.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rand::Rng;
use serde::Deserialize;
use tower_sessions::Session;

use setahun_core::UserId;

use crate::db::UserRepository;
use crate::error::Result;
use crate::middleware::{bind_user, clear_user};
use crate::models::session_keys;
use crate::services::auth::AuthError;
use crate::services::reconcile;
use crate::state::AppState;

/// Query parameters from the Google OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code to exchange for tokens.
    pub code: Option<String>,
    /// State parameter for CSRF protection.
    pub state: Option<String>,
    /// Error code if authorization failed.
    pub error: Option<String>,
}

/// Generate a cryptographically secure random string.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            // SAFETY: idx is always within bounds since random_range returns 0..CHARSET.len()
            char::from(*CHARSET.get(idx).expect("idx within bounds"))
        })
        .collect()
}

/// Initiate Google OAuth login.
///
/// Generates a state parameter, stores it in the session, and redirects to
/// Google's consent page. Answers 503 when credentials are not configured.
///
/// # Route
///
/// `GET /auth/google/login`
pub async fn login(State(state): State<AppState>, session: Session) -> Result<Response> {
    let google = state.google().ok_or(AuthError::NotConfigured)?;

    let oauth_state = generate_random_string(32);
    session
        .insert(session_keys::OAUTH_STATE, &oauth_state)
        .await?;

    let auth_url = google.authorization_url(&state.config().redirect_url(), &oauth_state);

    Ok(Redirect::to(&auth_url).into_response())
}

/// Handle the Google OAuth callback.
///
/// Validates the state parameter, exchanges the authorization code for the
/// asserted identity, reconciles it with the session's account, and rebinds
/// the session as the final step.
///
/// # Route
///
/// `GET /auth/google/callback`
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Result<Response> {
    let google = state.google().ok_or(AuthError::NotConfigured)?;

    // Check for OAuth errors from Google (user denied, etc.)
    if let Some(error) = query.error {
        tracing::warn!(error = %error, "Google OAuth error");
        return Ok(Redirect::to("/?error=google_denied").into_response());
    }

    let Some(code) = query.code else {
        tracing::warn!("Google OAuth callback missing code");
        return Ok(Redirect::to("/?error=missing_code").into_response());
    };

    // Verify state parameter (CSRF protection)
    let Some(returned_state) = query.state else {
        tracing::warn!("Google OAuth callback missing state");
        return Ok(Redirect::to("/?error=missing_state").into_response());
    };

    let stored_state: Option<String> = session
        .get(session_keys::OAUTH_STATE)
        .await
        .ok()
        .flatten();

    if stored_state.as_ref() != Some(&returned_state) {
        tracing::warn!("Google OAuth state mismatch");
        return Ok(Redirect::to("/?error=invalid_state").into_response());
    }

    // Clear the stored state (one-time use)
    let _ = session.remove::<String>(session_keys::OAUTH_STATE).await;

    // Exchange the code and fetch the identity. A failure here aborts the
    // login before any account is touched.
    let assertion = match google
        .assert_identity(&code, &state.config().redirect_url())
        .await
    {
        Ok(assertion) => assertion,
        Err(e) => {
            tracing::error!(error = %e, "Google identity assertion failed");
            return Ok(Redirect::to("/?error=exchange_failed").into_response());
        }
    };

    let current: Option<UserId> = session.get(session_keys::USER_ID).await?;

    let (user_id, outcome) = reconcile::reconcile(state.pool(), current, &assertion).await?;

    // Rebind last: storage is already consistent at this point.
    bind_user(&session, user_id).await?;

    tracing::info!(user_id = %user_id, outcome = ?outcome, "reader signed in");

    Ok(Redirect::to("/").into_response())
}

/// Log out the current reader.
///
/// Only a linked account is unbound; the next request then starts a fresh
/// anonymous one. An anonymous binding is left alone, there is nothing to
/// log out of and clearing it would orphan the reader's progress.
///
/// # Route
///
/// `POST /auth/logout`
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let bound: Option<UserId> = session.get(session_keys::USER_ID).await?;

    if let Some(id) = bound {
        let user = UserRepository::new(state.pool()).get_by_id(id).await;
        if user?.is_some_and(|user| user.is_linked()) {
            clear_user(&session).await?;
            crate::error::clear_sentry_user();
        }
    }

    Ok(Redirect::to("/").into_response())
}
