//! Marquee Core
//!
//! Entry point for the movie-catalog client: configuration, logging and
//! the [`App`] that wires storage, session and catalog together.
//! The UI holds one `App` and reads all state through it.

mod app;
mod config;
mod error;

pub use app::App;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use marquee_auth::{
    AuthError, AuthResponse, SessionManager, SessionOptions, User, ADMIN_ROLE,
};
pub use marquee_catalog::{AdminDashboard, CatalogError, Movie, Notification, NotificationKind};
pub use marquee_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
