//! In-memory configuration for testing.

use std::path::Path;

use super::{Config, IniDocument};

/// In-memory configuration for testing.
///
/// No disk I/O is performed.
///
/// # Examples
///
/// ```
/// use ghrepo_core::config::{Config, MemoryConfig};
///
/// let config = MemoryConfig::new().with_token("ghp_token123");
/// assert_eq!(config.token().as_deref(), Some("ghp_token123"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryConfig {
    doc: IniDocument,
}

impl MemoryConfig {
    /// Create a new empty in-memory configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary section/key value.
    #[must_use]
    pub fn with_value(mut self, section: &str, key: &str, value: &str) -> Self {
        self.doc.set(section, key, value);
        self
    }

    /// Set the `[github] token` entry.
    #[must_use]
    pub fn with_token(self, token: &str) -> Self {
        self.with_value("github", "token", token)
    }
}

impl Config for MemoryConfig {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        self.doc.get(section, key).map(str::to_string)
    }

    fn path(&self) -> Option<&Path> {
        None
    }
}
