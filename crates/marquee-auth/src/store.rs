//! Persistent token storage

use parking_lot::Mutex;

use marquee_storage::Database;

use crate::Result;

/// Settings key holding the current bearer token.
pub const TOKEN_KEY: &str = "token";

/// Holds at most one token; absence means unauthenticated.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, token: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Token store backed by the SQLite settings table.
pub struct SettingsTokenStore {
    db: Database,
}

impl SettingsTokenStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl TokenStore for SettingsTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.db.get_setting(TOKEN_KEY)?)
    }

    fn save(&self, token: &str) -> Result<()> {
        Ok(self.db.set_setting(TOKEN_KEY, token)?)
    }

    fn clear(&self) -> Result<()> {
        Ok(self.db.delete_setting(TOKEN_KEY)?)
    }
}

/// Process-local token store. Nothing survives the process.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.token.lock().take();
        Ok(())
    }
}
