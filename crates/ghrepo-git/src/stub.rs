//! In-memory [`LocalRepo`] for command tests.

use std::sync::Mutex;
use std::sync::PoisonError;

use async_trait::async_trait;

use crate::errors::GitError;
use crate::local::LocalRepo;

/// A git operation recorded by [`StubLocalRepo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    /// `git config user.name`
    Identity,
    /// `git remote add NAME URL`
    AddRemote {
        /// Remote name.
        name: String,
        /// Remote URL.
        url: String,
    },
    /// `git push --set-upstream REMOTE BRANCH`
    Push {
        /// Remote name.
        remote: String,
        /// Branch name.
        branch: String,
    },
}

/// Stub local repository that records every call.
#[derive(Debug, Default)]
pub struct StubLocalRepo {
    identity: Option<String>,
    fail_add_remote: bool,
    fail_push: bool,
    calls: Mutex<Vec<GitCall>>,
}

impl StubLocalRepo {
    /// A repository with no `user.name` configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `user.name` reported by `identity`.
    #[must_use]
    pub fn with_identity(mut self, name: impl Into<String>) -> Self {
        self.identity = Some(name.into());
        self
    }

    /// Make `add_remote` fail.
    #[must_use]
    pub fn failing_add_remote(mut self) -> Self {
        self.fail_add_remote = true;
        self
    }

    /// Make `push_upstream` fail.
    #[must_use]
    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Calls other than `identity`, i.e. the ones that change the checkout.
    pub fn mutating_calls(&self) -> Vec<GitCall> {
        self.calls()
            .into_iter()
            .filter(|c| *c != GitCall::Identity)
            .collect()
    }

    fn record(&self, call: GitCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

#[async_trait]
impl LocalRepo for StubLocalRepo {
    async fn identity(&self) -> Result<Option<String>, GitError> {
        self.record(GitCall::Identity);
        Ok(self.identity.clone())
    }

    async fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        self.record(GitCall::AddRemote {
            name: name.to_string(),
            url: url.to_string(),
        });
        if self.fail_add_remote {
            return Err(GitError::Failed {
                command: "remote".to_string(),
                message: format!("error: remote {name} already exists."),
                status: Some(3),
            });
        }
        Ok(())
    }

    async fn push_upstream(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.record(GitCall::Push {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
        if self.fail_push {
            return Err(GitError::Failed {
                command: "push".to_string(),
                message: "exit status 1".to_string(),
                status: Some(1),
            });
        }
        Ok(())
    }
}
