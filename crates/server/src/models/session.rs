//! Session-related types.
//!
//! The session stores only the bound user ID; the user row itself is loaded
//! fresh on every request so that merges and promotions are visible
//! immediately.

/// Session keys for authentication data.
pub mod keys {
    /// Key for the bound user's internal ID.
    pub const USER_ID: &str = "user_id";

    /// Key for Google OAuth state (CSRF protection).
    pub const OAUTH_STATE: &str = "oauth_state";
}
