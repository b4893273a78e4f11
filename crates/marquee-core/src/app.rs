//! Main client state container

use std::sync::Arc;
use std::time::Duration;

use marquee_auth::{
    AuthResponse, HttpAuthApi, SessionManager, SessionOptions, SettingsTokenStore, User,
};
use marquee_catalog::{AdminDashboard, HttpMovieCatalog};
use marquee_storage::Database;

use crate::config::Config;
use crate::Result;

/// Main client instance
///
/// Constructed once and shared with every consumer. Construction restores
/// any session persisted by a previous run.
pub struct App {
    config: Config,
    db: Database,
    session_manager: SessionManager,
    dashboard: AdminDashboard,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_database(config, db)
    }

    /// Build the client on an already opened database.
    pub fn with_database(config: Config, db: Database) -> Result<Self> {
        let api_url = config.api_url.clone();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let auth_api = HttpAuthApi::new(http.clone(), &api_url)?;
        let session_manager = SessionManager::new(
            Arc::new(auth_api),
            Arc::new(SettingsTokenStore::new(db.clone())),
            SessionOptions {
                check_expiry: config.check_token_expiry,
            },
        );

        let catalog = HttpMovieCatalog::new(http, &api_url, session_manager.clone())?;
        let dashboard = AdminDashboard::new(Arc::new(catalog), session_manager.clone());

        tracing::info!(
            api_url = %api_url,
            authenticated = session_manager.is_authenticated(),
            "Client initialized"
        );

        Ok(Self {
            config,
            db,
            session_manager,
            dashboard,
        })
    }

    // === Session operations ===

    pub fn session_manager(&self) -> &SessionManager {
        &self.session_manager
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        Ok(self.session_manager.login(username, password).await?)
    }

    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<()> {
        Ok(self
            .session_manager
            .signup(username, password, first_name, last_name)
            .await?)
    }

    pub fn logout(&self) {
        self.session_manager.logout();
    }

    pub fn current_user(&self) -> Option<User> {
        self.session_manager.current_user()
    }

    // === Admin operations ===

    pub fn dashboard(&self) -> &AdminDashboard {
        &self.dashboard
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Clone for App {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            session_manager: self.session_manager.clone(),
            dashboard: self.dashboard.clone(),
        }
    }
}
