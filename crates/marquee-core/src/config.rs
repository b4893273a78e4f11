//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::Result;

const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "MARQUEE_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file holding the persisted token
    pub database_path: PathBuf,
    /// Base URL of the REST API, without the `/api` suffix
    pub api_url: Url,
    /// Reject tokens whose `exp` claim has passed instead of waiting for
    /// the server to refuse them
    #[serde(default)]
    pub check_token_expiry: bool,
    /// Per-request timeout for API calls
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("marquee.db"),
            api_url: default_api_url(),
            check_token_expiry: false,
            request_timeout_secs: 30,
        }
    }

    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    /// Parse `raw` as the API base URL.
    pub fn parse_api_url(self, raw: &str) -> Result<Self> {
        let api_url = Url::parse(raw.trim())?;
        Ok(self.with_api_url(api_url))
    }

    /// Default configuration with `MARQUEE_API_URL` applied, if set.
    pub fn from_env() -> Result<Self> {
        let config = Self::default();
        match std::env::var(API_URL_ENV) {
            Ok(raw) if !raw.trim().is_empty() => config.parse_api_url(&raw),
            _ => Ok(config),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Marquee"))
            .unwrap_or_else(|| PathBuf::from(".marquee"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("default API URL is a valid URL")
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    #[test]
    fn test_new_config() {
        let config = Config::new(PathBuf::from("/var/lib/marquee"));
        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/marquee/marquee.db")
        );
        assert_eq!(config.api_url.as_str(), "http://localhost:8080/");
        assert!(!config.check_token_expiry);
    }

    #[test]
    fn test_deserialize_without_expiry_flag() {
        let config: Config = serde_json::from_str(
            r#"{
                "database_path": "/tmp/marquee.db",
                "api_url": "https://movies.example.com",
                "request_timeout_secs": 10
            }"#,
        )
        .unwrap();

        assert!(!config.check_token_expiry);
        assert_eq!(config.api_url.host_str(), Some("movies.example.com"));
    }

    #[test]
    fn test_invalid_api_url_rejected_at_load() {
        let result = serde_json::from_str::<Config>(
            r#"{
                "database_path": "/tmp/marquee.db",
                "api_url": "not a url",
                "request_timeout_secs": 10
            }"#,
        );
        assert!(result.is_err());

        let parsed = Config::new(PathBuf::from("/tmp")).parse_api_url("not a url");
        assert!(matches!(parsed, Err(CoreError::InvalidUrl(_))));

        let config = Config::new(PathBuf::from("/tmp"))
            .parse_api_url(" https://movies.example.com:8443 ")
            .unwrap();
        assert_eq!(config.api_url.port(), Some(8443));
    }
}
