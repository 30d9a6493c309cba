//! Backend location for the REST client.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard talks to an external API whose base URL is fixed at build
//! time through `NEXUSART_API_URL`. Paths passed to the client are always
//! absolute (`/api/...`) and are joined onto the normalized base.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use thiserror::Error;

/// Base URL used when `NEXUSART_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API base URL cannot be empty")]
    Empty,
    #[error("API base URL must start with http:// or https://: {0}")]
    Scheme(String),
}

/// Validated API endpoint configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Build a config from `base_url`, stripping trailing slashes.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is blank or not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::Empty);
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ConfigError::Scheme(trimmed.to_owned()));
        }
        Ok(Self { base_url: trimmed.to_owned() })
    }

    /// Config from the build environment, falling back to the default URL.
    pub fn from_env() -> Self {
        let raw = option_env!("NEXUSART_API_URL").unwrap_or(DEFAULT_API_URL);
        Self::new(raw).unwrap_or_else(|e| {
            log::warn!("ignoring NEXUSART_API_URL: {e}");
            Self { base_url: DEFAULT_API_URL.to_owned() }
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` with `query` pairs form-encoded.
    pub fn url_for(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
