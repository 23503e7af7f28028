//! File-based configuration implementation.
//!
//! Reads `config.ini` from the ghrepo config directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Config, IniDocument};
use crate::errors::ConfigError;

/// File-based configuration backed by an INI file.
#[derive(Debug)]
pub struct FileConfig {
    path: PathBuf,
    doc: IniDocument,
}

impl FileConfig {
    /// Load configuration from disk.
    ///
    /// A missing file yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using empty config");
            return Ok(Self {
                path: path.to_path_buf(),
                doc: IniDocument::default(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;
        let doc = IniDocument::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "loaded config file");
        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }
}

impl Config for FileConfig {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        self.doc.get(section, key).map(str::to_string)
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
