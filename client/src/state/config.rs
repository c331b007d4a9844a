//! API base URL configuration with a user-controlled override.
//!
//! The default comes from the build (`AUTHGATE_API_BASE_URL`) or falls back to
//! the local development server. A user override is persisted in
//! `localStorage` and only changes through the settings panel.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use url::Url;

use crate::util::storage;

pub const DEFAULT_API_BASE_URL: &str = match option_env!("AUTHGATE_API_BASE_URL") {
    Some(url) => url,
    None => "http://127.0.0.1:8000",
};

const STORAGE_KEY: &str = "api_base_url";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("API base URL is empty")]
    Empty,
    #[error("API base URL is not a valid URL: {0}")]
    Invalid(String),
    #[error("API base URL must use http or https, got `{0}`")]
    UnsupportedScheme(String),
}

/// Normalize a candidate base URL: trimmed, no trailing slash, absolute
/// `http(s)` with a host and no query or fragment.
///
/// # Errors
///
/// Returns a `ConfigError` describing why `raw` cannot be used as a base.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::Empty);
    }
    let parsed = Url::parse(trimmed).map_err(|e| ConfigError::Invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_owned()));
    }
    if parsed.host_str().is_none() {
        return Err(ConfigError::Invalid("missing host".to_owned()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ConfigError::Invalid("query and fragment are not allowed".to_owned()));
    }
    Ok(trimmed.to_owned())
}

/// Active API endpoint settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    /// True when `base_url` came from a stored user override.
    pub overridden: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.trim_end_matches('/').to_owned(), overridden: false }
    }
}

impl ApiConfig {
    /// Read the persisted override, if any.
    pub fn load() -> Self {
        Self::from_override(storage::read_string(STORAGE_KEY).as_deref())
    }

    /// Build config from a raw stored override; unusable values fall back to
    /// the default.
    pub fn from_override(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match normalize_base_url(raw) {
            Ok(base_url) => Self { base_url, overridden: true },
            Err(e) => {
                log::warn!("ignoring stored API base URL: {e}");
                Self::default()
            }
        }
    }

    /// Validate and persist a new override.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` and leaves storage untouched if `raw` is not a
    /// usable base URL.
    pub fn save_override(raw: &str) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(raw)?;
        storage::write_string(STORAGE_KEY, &base_url);
        Ok(Self { base_url, overridden: true })
    }

    /// Drop the override and return to the default.
    pub fn reset() -> Self {
        storage::remove(STORAGE_KEY);
        Self::default()
    }
}
