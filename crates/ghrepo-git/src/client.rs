//! Git client that wraps the git command-line tool.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::instrument;

use crate::errors::GitError;

/// Client for executing git commands.
#[derive(Debug, Clone)]
pub struct GitClient {
    /// Path to the git binary.
    git_path: PathBuf,
    /// Working directory for git commands.
    repo_dir: Option<PathBuf>,
}

impl GitClient {
    /// Create a new git client using the system git.
    ///
    /// # Errors
    ///
    /// Returns an error if git is not found in PATH.
    pub fn new() -> Result<Self, GitError> {
        let git_path = which::which("git").map_err(|_| GitError::NotFound)?;

        Ok(Self {
            git_path,
            repo_dir: None,
        })
    }

    /// Set the working directory.
    #[must_use]
    pub fn with_repo_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = Some(dir.into());
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.git_path);
        cmd.args(args);
        if let Some(ref dir) = self.repo_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Execute a git command and return stdout.
    #[instrument(skip(self), fields(args = ?args))]
    async fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let mut cmd = self.command(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let command = args.first().copied().unwrap_or("").to_string();
            return Err(GitError::Failed {
                command,
                message: stderr.trim().to_string(),
                status: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Execute a git command whose output goes straight to the terminal.
    #[instrument(skip(self), fields(args = ?args))]
    async fn run_passthrough(&self, args: &[&str]) -> Result<(), GitError> {
        let mut cmd = self.command(args);
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        let status = cmd.status().await?;

        if !status.success() {
            let command = args.first().copied().unwrap_or("").to_string();
            let message = status
                .code()
                .map_or_else(|| "terminated by signal".to_string(), |c| format!("exit status {c}"));
            return Err(GitError::Failed {
                command,
                message,
                status: status.code(),
            });
        }

        Ok(())
    }

    /// Get a git config value.
    ///
    /// Returns `Ok(None)` when the key is not set.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run or fails for another reason.
    pub async fn config_get(&self, key: &str) -> Result<Option<String>, GitError> {
        match self.run(&["config", key]).await {
            Ok(output) => Ok(Some(first_line(&output).to_string())),
            // Exit status 1 means the key is unset.
            Err(e) if e.status() == Some(1) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Add a new remote.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote cannot be added.
    pub async fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        self.run(&["remote", "add", name, url]).await?;
        Ok(())
    }

    /// Push a branch and record the remote as its upstream.
    ///
    /// # Errors
    ///
    /// Returns an error if the push fails.
    pub async fn push(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.run_passthrough(&["push", "--set-upstream", remote, branch])
            .await
    }
}

fn first_line(output: &str) -> &str {
    output.lines().next().unwrap_or("")
}
