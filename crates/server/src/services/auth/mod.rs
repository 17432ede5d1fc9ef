//! Google OAuth client.
//!
//! # OAuth Flow
//!
//! 1. Generate authorization URL with `authorization_url()`
//! 2. Redirect the reader to Google's consent page
//! 3. Google redirects back with an authorization code
//! 4. Exchange the code and fetch the identity with `assert_identity()`
//!
//! The client only asks for `openid email profile`; the resulting
//! [`IdentityAssertion`] is the sole input to reconciliation.

mod error;

pub use error::AuthError;

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::GoogleConfig;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// A verified identity returned by Google.
///
/// `google_id` is the stable subject identifier; email and name are
/// best-effort profile data and may change between logins.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityAssertion {
    /// Stable Google subject identifier.
    #[serde(rename = "id")]
    pub google_id: String,
    /// Email address, if shared.
    pub email: Option<String>,
    /// Display name, if shared.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for Google's OAuth 2.0 endpoints.
#[derive(Clone)]
pub struct GoogleClient {
    inner: Arc<GoogleClientInner>,
}

struct GoogleClientInner {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
}

impl GoogleClient {
    /// Create a new Google OAuth client.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the underlying HTTP client cannot be built.
    pub fn new(config: &GoogleConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            inner: Arc::new(GoogleClientInner {
                client,
                client_id: config.client_id.clone(),
                client_secret: config.client_secret.expose_secret().to_string(),
            }),
        })
    }

    /// Generate the authorization URL for login.
    ///
    /// # Arguments
    ///
    /// * `redirect_uri` - The callback URL registered with Google
    /// * `state` - A random string stored in the session to prevent CSRF attacks
    #[must_use]
    pub fn authorization_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "{AUTHORIZE_URL}?\
            client_id={}&\
            response_type=code&\
            redirect_uri={}&\
            scope=openid%20email%20profile&\
            state={}",
            urlencoding::encode(&self.inner.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(state)
        )
    }

    /// Exchange an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Exchange` if Google rejects the code, or
    /// `AuthError::Http` on transport failure.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<String, AuthError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.inner.client_id.as_str()),
            ("client_secret", self.inner.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let response = self
            .inner
            .client
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::Exchange(text));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// Fetch the authenticated user's profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Userinfo` if Google rejects the token or returns
    /// an identity without a subject, or `AuthError::Http` on transport
    /// failure.
    pub async fn fetch_userinfo(&self, access_token: &str) -> Result<IdentityAssertion, AuthError> {
        let response = self
            .inner
            .client
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::Userinfo(format!("({status}): {text}")));
        }

        let assertion: IdentityAssertion = response.json().await?;
        if assertion.google_id.is_empty() {
            return Err(AuthError::Userinfo(
                "identity has no subject identifier".to_string(),
            ));
        }

        Ok(assertion)
    }

    /// Run the full code-to-identity exchange.
    ///
    /// Any failure here aborts login before reconciliation touches storage.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::exchange_code`] and
    /// [`Self::fetch_userinfo`].
    pub async fn assert_identity(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<IdentityAssertion, AuthError> {
        let access_token = self.exchange_code(code, redirect_uri).await?;
        self.fetch_userinfo(&access_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn client() -> GoogleClient {
        GoogleClient::new(&GoogleConfig {
            client_id: "client-id".to_string(),
            client_secret: SecretString::from("secret"),
        })
        .unwrap()
    }

    #[test]
    fn test_authorization_url_encodes_parameters() {
        let url = client().authorization_url("http://localhost:3000/auth/google/callback", "st&te");
        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fgoogle%2Fcallback"));
        assert!(url.contains("state=st%26te"));
        assert!(url.contains("scope=openid%20email%20profile"));
    }

    #[test]
    fn test_identity_assertion_deserializes_userinfo_shape() {
        let assertion: IdentityAssertion = serde_json::from_str(
            r#"{"id":"sub-123","email":"budi@example.com","name":"Budi","picture":"x"}"#,
        )
        .unwrap();
        assert_eq!(assertion.google_id, "sub-123");
        assert_eq!(assertion.email.as_deref(), Some("budi@example.com"));
        assert_eq!(assertion.name.as_deref(), Some("Budi"));
    }

    #[test]
    fn test_identity_assertion_tolerates_missing_profile_fields() {
        let assertion: IdentityAssertion = serde_json::from_str(r#"{"id":"sub-123"}"#).unwrap();
        assert!(assertion.email.is_none());
        assert!(assertion.name.is_none());
    }
}
