//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Google OAuth credentials are not configured.
    #[error("login is not configured")]
    NotConfigured,

    /// HTTP error talking to the identity provider.
    #[error("identity provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Token exchange rejected by the identity provider.
    #[error("token exchange failed: {0}")]
    Exchange(String),

    /// Userinfo request rejected or returned an unusable identity.
    #[error("userinfo request failed: {0}")]
    Userinfo(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
