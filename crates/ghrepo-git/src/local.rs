//! The local checkout as seen by commands.

use async_trait::async_trait;
use tracing::debug;

use crate::client::GitClient;
use crate::errors::GitError;

/// Operations commands perform on the local git checkout.
#[async_trait]
pub trait LocalRepo: Send + Sync + std::fmt::Debug {
    /// The configured `user.name`, if any.
    async fn identity(&self) -> Result<Option<String>, GitError>;

    /// Register a remote named `name` pointing at `url`.
    async fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError>;

    /// Push `branch` to `remote` and set it as the upstream.
    async fn push_upstream(&self, remote: &str, branch: &str) -> Result<(), GitError>;
}

#[async_trait]
impl LocalRepo for GitClient {
    async fn identity(&self) -> Result<Option<String>, GitError> {
        let name = self
            .config_get("user.name")
            .await?
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        debug!(found = name.is_some(), "read git user.name");
        Ok(name)
    }

    async fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        GitClient::add_remote(self, name, url).await
    }

    async fn push_upstream(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.push(remote, branch).await
    }
}
