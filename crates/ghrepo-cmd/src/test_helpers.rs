//! Shared test utilities for command testing.
//!
//! Provides a factory wired to a wiremock server, a stub prompter and a stub
//! git checkout, plus small mock-mounting helpers.

use std::sync::Arc;

use ghrepo_core::config::{MemoryConfig, Settings};
use ghrepo_core::iostreams::TestOutput;
use ghrepo_core::prompter::StubPrompter;
use ghrepo_git::StubLocalRepo;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::factory::Factory;

/// Token the harness injects through `GITHUB_TOKEN`.
pub const TEST_TOKEN: &str = "ghp_test_token_123";

/// A fully-configured test harness with factory, output capture, and mock server.
#[derive(Debug)]
pub struct TestHarness {
    /// The factory configured for testing.
    pub factory: Factory,
    /// Captured stdout/stderr output.
    pub output: TestOutput,
    /// Wiremock mock server for API requests.
    pub server: MockServer,
    /// Stub prompter for providing test answers.
    pub prompter: Arc<StubPrompter>,
    /// Stub git checkout recording every call.
    pub git: Arc<StubLocalRepo>,
}

impl TestHarness {
    /// Create a harness with `GITHUB_TOKEN` set and a git checkout whose
    /// `user.name` is `octocat`.
    pub async fn new() -> Self {
        Self::build(StubLocalRepo::new().with_identity("octocat"), true).await
    }

    /// Create a harness with a custom git checkout.
    pub async fn with_local_repo(git: StubLocalRepo) -> Self {
        Self::build(git, true).await
    }

    /// Create a harness with no token in the environment or config.
    pub async fn without_token() -> Self {
        Self::build(StubLocalRepo::new().with_identity("octocat"), false).await
    }

    async fn build(git: StubLocalRepo, with_token: bool) -> Self {
        let server = MockServer::start().await;
        let settings = Settings::default()
            .with_config_path("/nonexistent/ghrepo/config.ini")
            .with_api_url(&server.uri())
            .unwrap_or_else(|e| panic!("mock server URI rejected: {e}"));

        let git = Arc::new(git);
        let (factory, output) = Factory::test(settings);
        let (factory, prompter) = factory.with_stub_prompter();
        let mut factory = factory
            .with_http_client(reqwest::Client::new())
            .with_config(Arc::new(MemoryConfig::new()))
            .with_local_repo(git.clone());
        if with_token {
            factory = factory.with_env("GITHUB_TOKEN", TEST_TOKEN);
        }

        Self {
            factory,
            output,
            server,
            prompter,
            git,
        }
    }

    /// Get captured stdout as a string.
    pub fn stdout(&self) -> String {
        self.output.stdout()
    }

    /// Get captured stderr as a string.
    pub fn stderr(&self) -> String {
        self.output.stderr()
    }

    /// Number of requests the mock server has seen.
    pub async fn received_request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}

// --- Wiremock helpers ---

/// Mount a REST DELETE mock answering `status` and expecting `times` calls.
pub async fn mock_rest_delete(server: &MockServer, url_path: &str, status: u16, times: u64) {
    Mock::given(method("DELETE"))
        .and(path(url_path))
        .and(header("Authorization", "token ghp_test_token_123"))
        .respond_with(ResponseTemplate::new(status))
        .expect(times)
        .mount(server)
        .await;
}

/// Mount a REST POST response mock for a specific path.
pub async fn mock_rest_post(
    server: &MockServer,
    url_path: &str,
    status: u16,
    response_body: serde_json::Value,
) {
    Mock::given(method("POST"))
        .and(path(url_path))
        .and(header("Authorization", "token ghp_test_token_123"))
        .respond_with(ResponseTemplate::new(status).set_body_json(response_body))
        .mount(server)
        .await;
}
