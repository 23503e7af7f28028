//! Factory for shared command dependencies.
//!
//! Provides lazy initialization of configuration, the git client, the
//! prompter and API clients. Supports test mode with dependency injection
//! for isolated testing.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use ghrepo_api::client::Client;
use ghrepo_core::config::{Config, FileConfig, Settings};
use ghrepo_core::credentials::{Credential, resolve_token};
use ghrepo_core::errors::ConfigError;
use ghrepo_core::iostreams::{IOStreams, TestOutput};
use ghrepo_core::prompter::{DialoguerPrompter, Prompter, StubPrompter};
use ghrepo_git::{GitClient, GitError, LocalRepo};

/// Shared factory providing lazily-initialized dependencies to all commands.
///
/// In production mode, dependencies are created from the real system.
/// In test mode, dependencies can be injected for isolated testing.
pub struct Factory {
    /// Application version.
    pub app_version: String,
    /// I/O streams.
    pub io: IOStreams,
    /// Settings resolved at startup.
    settings: Settings,
    /// Configuration (lazily loaded).
    config: OnceLock<Arc<dyn Config>>,
    /// Local checkout (lazily resolved).
    local_repo: OnceLock<Arc<dyn LocalRepo>>,

    // Test overrides
    http_override: Option<reqwest::Client>,
    env_override: Option<HashMap<String, String>>,
    prompter_stub: Option<Arc<StubPrompter>>,
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("app_version", &self.app_version)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Factory {
    /// Create a new factory with the given version and settings.
    pub fn new(app_version: String, settings: Settings) -> Self {
        Self {
            app_version,
            io: IOStreams::system(),
            settings,
            config: OnceLock::new(),
            local_repo: OnceLock::new(),
            http_override: None,
            env_override: None,
            prompter_stub: None,
        }
    }

    /// Create a test factory with captured I/O and an empty environment.
    ///
    /// Returns the factory and a `TestOutput` for reading captured
    /// stdout/stderr.
    pub fn test(settings: Settings) -> (Self, TestOutput) {
        let (io, output) = IOStreams::test_with_output();

        let factory = Self {
            app_version: "test".to_string(),
            io,
            settings,
            config: OnceLock::new(),
            local_repo: OnceLock::new(),
            http_override: None,
            env_override: Some(HashMap::new()),
            prompter_stub: None,
        };

        (factory, output)
    }

    /// Set a custom reqwest HTTP client (e.g., backed by wiremock).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_override = Some(client);
        self
    }

    /// Set an environment variable visible to this factory only.
    #[must_use]
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env_override
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Set a config override for testing.
    #[must_use]
    pub fn with_config(self, config: Arc<dyn Config>) -> Self {
        let _ = self.config.set(config);
        self
    }

    /// Set the local checkout used by commands.
    #[must_use]
    pub fn with_local_repo(self, repo: Arc<dyn LocalRepo>) -> Self {
        let _ = self.local_repo.set(repo);
        self
    }

    /// Set a stub prompter and return the shared reference for configuration.
    pub fn with_stub_prompter(mut self) -> (Self, Arc<StubPrompter>) {
        let stub = Arc::new(StubPrompter::default());
        self.prompter_stub = Some(stub.clone());
        (self, stub)
    }

    /// Settings resolved at startup.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read an environment variable, honoring test overrides.
    pub fn env_var(&self, key: &str) -> Option<String> {
        match self.env_override {
            Some(ref vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        }
    }

    /// Get the configuration, loading it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn config(&self) -> Result<Arc<dyn Config>, ConfigError> {
        if let Some(cfg) = self.config.get() {
            return Ok(cfg.clone());
        }
        let cfg: Arc<dyn Config> = Arc::new(FileConfig::load(&self.settings.config_path)?);
        // Ignore set error - another thread may have set it first
        let _ = self.config.set(cfg.clone());
        Ok(cfg)
    }

    /// Get the local checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if git is not available.
    pub fn local_repo(&self) -> Result<Arc<dyn LocalRepo>, GitError> {
        if let Some(repo) = self.local_repo.get() {
            return Ok(repo.clone());
        }
        let repo: Arc<dyn LocalRepo> = Arc::new(GitClient::new()?);
        let _ = self.local_repo.set(repo.clone());
        Ok(repo)
    }

    /// Create a prompter instance.
    ///
    /// In test mode with a stub prompter, returns the stub.
    pub fn prompter(&self) -> Arc<dyn Prompter> {
        if let Some(ref stub) = self.prompter_stub {
            return stub.clone();
        }
        Arc::new(DialoguerPrompter::new())
    }

    /// Resolve the GitHub token from the environment, the config file, or
    /// the prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if no source yields a token or the config file is
    /// unreadable.
    pub fn credential(&self) -> anyhow::Result<Credential> {
        let env_value = self.env_var(&self.settings.token_env);
        let prompter = self.prompter();
        Ok(resolve_token(
            &self.settings,
            env_value,
            || self.config(),
            prompter.as_ref(),
            &self.io,
        )?)
    }

    /// Build an API client authenticated with `credential`.
    ///
    /// In test mode, uses the injected HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn api_client(&self, credential: &Credential) -> anyhow::Result<Client> {
        let http = if let Some(ref client) = self.http_override {
            client.clone()
        } else {
            let opts = ghrepo_api::http::HttpClientOptions {
                app_version: self.app_version.clone(),
            };
            ghrepo_api::http::build_client(&opts).context("failed to build HTTP client")?
        };

        Ok(Client::new(
            http,
            &self.settings.api_url,
            credential.token().clone(),
        ))
    }
}
