//! Marquee Catalog
//!
//! Admin-side catalog maintenance:
//! - Batch add and batch delete of movies against the REST API
//! - Requests carry the session's bearer token
//! - Every outcome becomes a short-lived notification for the UI

mod client;
mod dashboard;
mod error;
mod movie;
mod notification;

pub use client::{HttpMovieCatalog, MovieCatalog};
pub use dashboard::AdminDashboard;
pub use error::CatalogError;
pub use movie::Movie;
pub use notification::{Notification, NotificationKind, NOTIFICATION_DURATION};

pub type Result<T> = std::result::Result<T, CatalogError>;
