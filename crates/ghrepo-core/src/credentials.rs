//! GitHub token resolution.
//!
//! The token is taken from the first source that yields a non-empty value:
//! the `GITHUB_TOKEN` environment variable, the `[github] token` entry of
//! `config.ini`, then an interactive prompt. Masked input is tried first; if
//! the terminal cannot hide input the prompt is repeated with echo on.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, warn};

use crate::config::{Config, Settings};
use crate::errors::{ConfigError, CoreError};
use crate::iostreams::IOStreams;
use crate::prompter::{Prompter, is_interrupted, is_masked_input_unsupported};

/// Prompt shown when no stored token is available.
pub const TOKEN_PROMPT: &str =
    "GitHub token not found. Please enter your GitHub personal access token";

/// Where a token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Environment variable with this name.
    Env(String),
    /// Config file at this path.
    ConfigFile(PathBuf),
    /// Typed in at the prompt.
    Prompt,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(var) => write!(f, "{var}"),
            Self::ConfigFile(path) => write!(f, "{}", path.display()),
            Self::Prompt => f.write_str("prompt"),
        }
    }
}

/// A resolved access token and its source.
#[derive(Debug, Clone)]
pub struct Credential {
    token: SecretString,
    source: TokenSource,
}

impl Credential {
    /// Wrap a token.
    pub fn new(token: impl Into<String>, source: TokenSource) -> Self {
        Self {
            token: SecretString::from(token.into()),
            source,
        }
    }

    /// The secret token.
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// Where the token came from.
    pub fn source(&self) -> &TokenSource {
        &self.source
    }
}

/// Resolve the GitHub token.
///
/// `env_value` is the current value of `settings.token_env`. The config file
/// is only loaded when the environment does not provide a token, so a broken
/// config file does not matter while `GITHUB_TOKEN` is set.
///
/// # Errors
///
/// Returns [`CoreError::Config`] if the config file cannot be read or parsed,
/// [`CoreError::PromptInterrupted`] if the operator interrupts the prompt,
/// and [`CoreError::MissingCredential`] if no source yields a token.
pub fn resolve_token<F>(
    settings: &Settings,
    env_value: Option<String>,
    load_config: F,
    prompter: &dyn Prompter,
    ios: &IOStreams,
) -> Result<Credential, CoreError>
where
    F: FnOnce() -> Result<Arc<dyn Config>, ConfigError>,
{
    if let Some(token) = non_empty(env_value) {
        debug!(source = %settings.token_env, "using token from environment");
        return Ok(Credential::new(
            token,
            TokenSource::Env(settings.token_env.clone()),
        ));
    }

    let config = load_config()?;
    if let Some(token) = non_empty(config.token()) {
        let path = config
            .path()
            .map_or_else(|| settings.config_path.clone(), std::path::Path::to_path_buf);
        debug!(path = %path.display(), "using token from config file");
        return Ok(Credential::new(token, TokenSource::ConfigFile(path)));
    }

    if let Some(token) = prompt_for_token(prompter, ios)? {
        return Ok(Credential::new(token, TokenSource::Prompt));
    }

    Err(CoreError::MissingCredential {
        env_var: settings.token_env.clone(),
        config_path: settings.config_path.display().to_string(),
    })
}

fn prompt_for_token(
    prompter: &dyn Prompter,
    ios: &IOStreams,
) -> Result<Option<String>, CoreError> {
    let answer = match prompter.password(TOKEN_PROMPT) {
        Ok(token) => Some(token),
        Err(e) if is_masked_input_unsupported(&e) => {
            warn!(error = %e, "masked input unavailable, falling back to visible input");
            crate::ios_eprintln!(ios, "Could not read password securely.");
            match prompter.input(TOKEN_PROMPT) {
                Ok(token) => Some(token),
                Err(e) => unanswered(&e)?,
            }
        }
        Err(e) => unanswered(&e)?,
    };
    Ok(non_empty(answer))
}

// An interrupt aborts the run; other prompt failures just leave the token unset.
fn unanswered(err: &anyhow::Error) -> Result<Option<String>, CoreError> {
    if is_interrupted(err) {
        return Err(CoreError::PromptInterrupted);
    }
    debug!(error = %err, "token prompt failed");
    Ok(None)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
