//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};

use setahun_core::UserId;

/// A reader account (domain type).
///
/// Every visitor gets one, anonymous at first. Reconciliation against the
/// identity provider may link it, merge it into another account, or replace
/// it entirely.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique internal user ID.
    pub id: UserId,
    /// External identity, if this account has been linked.
    pub google_id: Option<String>,
    /// Email address from the identity provider.
    pub email: Option<String>,
    /// Display name from the identity provider.
    pub name: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this account is linked to an external identity.
    #[must_use]
    pub const fn is_linked(&self) -> bool {
        self.google_id.is_some()
    }

    /// Name shown in the header: the provider's name, then email, then a
    /// generic placeholder for anonymous accounts.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Tamu")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous() -> User {
        User {
            id: UserId::new(1),
            google_id: None,
            email: None,
            name: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_anonymous_user_is_not_linked() {
        let user = anonymous();
        assert!(!user.is_linked());
        assert_eq!(user.display_name(), "Tamu");
    }

    #[test]
    fn test_linked_user_prefers_name_over_email() {
        let user = User {
            google_id: Some("google-123".to_string()),
            email: Some("budi@example.com".to_string()),
            name: Some("Budi".to_string()),
            ..anonymous()
        };
        assert!(user.is_linked());
        assert_eq!(user.display_name(), "Budi");
    }

    #[test]
    fn test_linked_user_falls_back_to_email() {
        let user = User {
            google_id: Some("google-123".to_string()),
            email: Some("budi@example.com".to_string()),
            name: None,
            ..anonymous()
        };
        assert_eq!(user.display_name(), "budi@example.com");
    }
}
