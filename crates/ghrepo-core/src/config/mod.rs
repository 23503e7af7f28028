//! Configuration system for ghrepo.
//!
//! Two layers: [`Settings`], the immutable values resolved once at startup
//! (paths, API endpoint, remote and branch names), and the [`Config`] trait
//! over the user-edited `config.ini` that may carry the GitHub token.

mod file_config;
mod document;
mod memory_config;

use std::path::{Path, PathBuf};

use url::Url;

use crate::errors::ConfigError;

pub use file_config::FileConfig;
pub use document::IniDocument;
pub use memory_config::MemoryConfig;

/// Environment variable holding the GitHub token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "GHREPO_CONFIG_DIR";

/// Environment variable overriding the REST API base URL.
pub const API_URL_ENV: &str = "GHREPO_API_URL";

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com/";

/// Name of the credential file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Remote name registered for a newly created repository.
pub const DEFAULT_REMOTE: &str = "origin";

/// Branch pushed to a newly created repository.
pub const DEFAULT_BRANCH: &str = "master";

/// Description attached to repositories created by `--create-and-push`.
pub const DEFAULT_DESCRIPTION: &str = "Private repository created and published with ghrepo.";

/// Configuration directory path (usually `~/.ghrepo`).
fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ghrepo")
}

/// Immutable settings injected into the command factory at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path of the INI credential file.
    pub config_path: PathBuf,
    /// Environment variable consulted first for the token.
    pub token_env: String,
    /// REST API base URL, always ending in `/`.
    pub api_url: String,
    /// Remote name used when publishing a new repository.
    pub remote_name: String,
    /// Branch pushed when publishing a new repository.
    pub primary_branch: String,
    /// Description sent when creating a repository.
    pub description: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: default_config_dir().join(CONFIG_FILE_NAME),
            token_env: TOKEN_ENV.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            remote_name: DEFAULT_REMOTE.to_string(),
            primary_branch: DEFAULT_BRANCH.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl Settings {
    /// Resolve settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `GHREPO_API_URL` is not a valid absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL override is not a valid absolute URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(dir) = get(CONFIG_DIR_ENV) {
            settings.config_path = PathBuf::from(dir).join(CONFIG_FILE_NAME);
        }
        if let Some(url) = get(API_URL_ENV) {
            settings.api_url = normalize_api_url(&url)?;
        }

        Ok(settings)
    }

    /// Override the API base URL (used to point tests at a mock server).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not a valid absolute URL.
    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_url = normalize_api_url(url)?;
        Ok(self)
    }

    /// Override the config file path.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }
}

/// Validate an API base URL and make sure it ends with a slash so relative
/// paths like `repos/o/r` resolve under it.
fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        key: API_URL_ENV.to_string(),
        message: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            key: API_URL_ENV.to_string(),
            message: format!("unsupported scheme {}", url.scheme()),
        });
    }
    let mut s = url.to_string();
    if !s.ends_with('/') {
        s.push('/');
    }
    Ok(s)
}

/// Read-only view over the user's `config.ini`.
pub trait Config: Send + Sync + std::fmt::Debug {
    /// Get a value by section and key. Both lookups are case-insensitive.
    fn get(&self, section: &str, key: &str) -> Option<String>;

    /// Path the configuration was loaded from, if it came from disk.
    fn path(&self) -> Option<&Path>;

    /// The `[github] token` entry, if present and non-empty.
    fn token(&self) -> Option<String> {
        self.get("github", "token").filter(|t| !t.is_empty())
    }
}
