//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use setahun_core::PlanCatalog;

use crate::config::ServerConfig;
use crate::services::auth::GoogleClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool, the reading plan, and the
/// OAuth client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: SqlitePool,
    plan: PlanCatalog,
    google: Option<GoogleClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The OAuth client is only built when credentials are configured;
    /// without it the login routes answer 503 and everything else works.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the OAuth HTTP client cannot be built.
    pub fn new(
        config: ServerConfig,
        pool: SqlitePool,
        plan: PlanCatalog,
    ) -> Result<Self, reqwest::Error> {
        let google = match &config.google {
            Some(credentials) => Some(GoogleClient::new(credentials)?),
            None => None,
        };

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                plan,
                google,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the reading plan.
    #[must_use]
    pub fn plan(&self) -> &PlanCatalog {
        &self.inner.plan
    }

    /// Get the Google OAuth client, if login is configured.
    #[must_use]
    pub fn google(&self) -> Option<&GoogleClient> {
        self.inner.google.as_ref()
    }
}
