//! Catalog error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog API rejected the request ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Api { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Admin access required")]
    AdminRequired,
}

impl CatalogError {
    /// Message suitable for showing to the user, if the server sent one.
    pub fn message(&self) -> Option<&str> {
        match self {
            CatalogError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
