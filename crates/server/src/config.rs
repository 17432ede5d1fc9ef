//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DATABASE_PATH` - `SQLite` connection string (default: `sqlite:setahun.db?mode=rwc`)
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3000)
//! - `BASE_URL` - Public URL of the server (default: `http://127.0.0.1:3000`)
//! - `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET` - Identity provider
//!   credentials; login is disabled (503) when either is missing
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `SQLite` connection string.
    pub database_url: SecretString,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Public base URL, used to build the OAuth redirect URI.
    pub base_url: String,
    /// Google OAuth credentials; `None` disables login.
    pub google: Option<GoogleConfig>,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
}

/// Google OAuth client credentials.
///
/// Implements `Debug` manually to redact the client secret.
#[derive(Clone)]
pub struct GoogleConfig {
    /// OAuth client ID (safe to expose in redirect URLs).
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: SecretString,
}

impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a present variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = SecretString::from(get_env_or_default(
            "DATABASE_PATH",
            "sqlite:setahun.db?mode=rwc",
        ));
        let host = get_env_or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("BASE_URL", "http://127.0.0.1:3000");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            google: GoogleConfig::from_env(),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The OAuth callback URI registered with the identity provider.
    #[must_use]
    pub fn redirect_url(&self) -> String {
        format!("{}/auth/google/callback", self.base_url)
    }
}

impl GoogleConfig {
    /// Both credentials must be present for login to be enabled.
    fn from_env() -> Option<Self> {
        let client_id = get_optional_env("GOOGLE_CLIENT_ID")?;
        let client_secret = get_optional_env("GOOGLE_CLIENT_SECRET")?;
        Some(Self {
            client_id,
            client_secret: SecretString::from(client_secret),
        })
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> ServerConfig {
        ServerConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://127.0.0.1:3000".to_string(),
            google: Some(GoogleConfig {
                client_id: "client-id".to_string(),
                client_secret: SecretString::from("client-secret-value"),
            }),
            sentry_dsn: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_redirect_url() {
        assert_eq!(
            config().redirect_url(),
            "http://127.0.0.1:3000/auth/google/callback"
        );
    }

    #[test]
    fn test_google_config_debug_redacts_secret() {
        let debug_output = format!("{:?}", config().google.unwrap());
        assert!(debug_output.contains("client-id"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("client-secret-value"));
    }
}
