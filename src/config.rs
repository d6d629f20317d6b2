//! Client configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use reqwest::Url;
use std::env;

use crate::constants::backend;
use crate::error::{Error, Result};
use crate::types::ClubId;

/// Configuration for the client.
#[derive(Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Backend base URL, without a trailing slash
    pub base_url: String,
    /// Club that new registrations are attached to
    pub default_club_id: ClubId,
    /// Member email for the smoke tool and live tests
    pub email: Option<String>,
    /// Member password for the smoke tool and live tests
    pub password: Option<String>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Configuration pointing at an explicit backend, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            base_url: backend::DEFAULT_BASE_URL.to_string(),
            default_club_id: ClubId(backend::DEFAULT_CLUB_ID),
            email: None,
            password: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_name", &self.app_name)
            .field("app_version", &self.app_version)
            .field("base_url", &self.base_url)
            .field("default_club_id", &self.default_club_id)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = env::var("FLAMORE_API_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            Url::parse(&url).map_err(|e| {
                Error::config(
                    format!("FLAMORE_API_URL is not a valid URL ({e})"),
                    "Use a full URL such as http://192.168.0.178:3000",
                )
            })?;
            config.base_url = url;
        }

        if let Ok(club) = env::var("FLAMORE_CLUB_ID") {
            let id = club.trim().parse::<i64>().map_err(|_| {
                Error::config(
                    format!("FLAMORE_CLUB_ID must be a number, got {club:?}"),
                    "Set FLAMORE_CLUB_ID to the numeric id of your club",
                )
            })?;
            config.default_club_id = ClubId(id);
        }

        config.email = env::var("FLAMORE_EMAIL").ok().filter(|s| !s.is_empty());
        config.password = env::var("FLAMORE_PASSWORD").ok().filter(|s| !s.is_empty());

        Ok(config)
    }

    /// Check if member credentials are configured
    pub const fn has_credentials(&self) -> bool {
        self.email.is_some() && self.password.is_some()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn defaults_point_at_club_backend() {
        let config = Config::default();
        assert_eq!(config.base_url, backend::DEFAULT_BASE_URL);
        assert_eq!(config.default_club_id, ClubId(1));
        assert!(!config.has_credentials());
        assert_eq!(config.app_name(), "flamore");
    }

    #[test]
    fn with_base_url_strips_trailing_slash() {
        let config = Config::with_base_url("http://localhost:3000/");
        assert_eq!(config.base_url, "http://localhost:3000");
    }

    #[test]
    fn debug_redacts_password() {
        let config = Config {
            password: Some("titkos".into()),
            ..Config::default()
        };
        let shown = format!("{config:?}");
        assert!(!shown.contains("titkos"));
        assert!(shown.contains("<redacted>"));
    }
}
