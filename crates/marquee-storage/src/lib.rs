//! Marquee Storage Layer
//!
//! SQLite-backed key/value settings that survive restarts.
//! The authentication token lives here under a single key.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
