//! Identity reconciliation.
//!
//! After Google confirms who the reader is, the asserted identity has to be
//! reconciled with whatever account the current session is bound to. Three
//! outcomes are possible:
//!
//! - the identity already has an account here: the session's anonymous
//!   history is folded into it and the anonymous account disappears
//! - the identity is new and the session has an anonymous account: that
//!   account is linked in place, keeping its history
//! - there is nothing to carry over: a fresh linked account is created
//!
//! All storage mutations happen before the caller rebinds the session, so a
//! failure partway leaves the session pointing at a still-valid account.

use sqlx::SqlitePool;

use setahun_core::UserId;

use crate::db::{RepositoryError, UserRepository};
use crate::services::auth::{AuthError, IdentityAssertion};

/// How a login was reconciled with the session's existing account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The identity's existing account absorbed the session's anonymous
    /// history.
    Merged,
    /// The identity's existing account was simply signed into again.
    Resumed,
    /// The session's anonymous account was linked in place.
    Promoted,
    /// A brand-new linked account was created.
    Created,
}

/// Reconcile a verified identity with the session's current account.
///
/// `current` is the user ID the session is bound to, if any; a dangling ID
/// (row already deleted) is treated the same as no binding. Returns the ID
/// the session must be rebound to, which the caller does as the final step.
///
/// # Errors
///
/// Returns `AuthError::Repository` if any storage operation fails. No
/// partial merge state is left behind in that case.
pub async fn reconcile(
    pool: &SqlitePool,
    current: Option<UserId>,
    assertion: &IdentityAssertion,
) -> Result<(UserId, ReconcileOutcome), AuthError> {
    let users = UserRepository::new(pool);

    // Resolve the session binding to a live, still-anonymous account. A
    // linked current account keeps its own identity; logging in as someone
    // else never merges two linked histories.
    let anonymous = match current {
        Some(id) => users
            .get_by_id(id)
            .await
            .map_err(AuthError::Repository)?
            .filter(|user| !user.is_linked()),
        None => None,
    };

    if let Some(existing) = users.get_by_google_id(&assertion.google_id).await? {
        return match anonymous {
            Some(anon) if anon.id != existing.id => {
                users.merge_into(existing.id, anon.id).await?;
                tracing::info!(
                    user_id = %existing.id,
                    merged_from = %anon.id,
                    "merged anonymous history into existing account"
                );
                Ok((existing.id, ReconcileOutcome::Merged))
            }
            _ => Ok((existing.id, ReconcileOutcome::Resumed)),
        };
    }

    if let Some(anon) = anonymous {
        match users.promote(anon.id, assertion).await {
            Ok(()) => {
                tracing::info!(user_id = %anon.id, "linked anonymous account in place");
                return Ok((anon.id, ReconcileOutcome::Promoted));
            }
            // Lost a race: the row was linked or deleted between our read
            // and the guarded update. Fall through to a fresh account.
            Err(RepositoryError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }
    }

    let user = users.create_linked(assertion).await?;
    tracing::info!(user_id = %user.id, "created new linked account");
    Ok((user.id, ReconcileOutcome::Created))
}
