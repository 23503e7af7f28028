//! Core error types for ghrepo.

/// Errors originating from core operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// Configuration file read/parse error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No token from the environment, the config file, or the prompt.
    #[error(
        "GitHub token not provided. Please set the {env_var} environment variable, provide it in {config_path}, or enter the token when prompted."
    )]
    MissingCredential {
        /// Environment variable that was consulted.
        env_var: String,
        /// Config file that was consulted.
        config_path: String,
    },

    /// No `--owner` flag and no usable git identity.
    #[error(
        "Repository owner not provided and could not be found in git config. Please use the --owner flag or set it in your git config (git config --global user.name <username>)."
    )]
    MissingOwner,

    /// An interactive prompt failed, e.g. stdin was closed.
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// The operator interrupted a prompt.
    #[error("prompt interrupted")]
    PromptInterrupted,

    /// An owner or repository name that cannot be used as one URL path
    /// segment.
    #[error("invalid repository name {name:?}: {reason}")]
    InvalidRepoName {
        /// The offending owner or name.
        name: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Configuration-specific errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path of the config file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse config.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Path of the config file.
        path: String,
        /// Parser message, including line and column.
        message: String,
    },

    /// Invalid setting value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Setting name.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
}
