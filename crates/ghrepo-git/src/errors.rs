//! Failures of the `git` subprocess.

/// Why a git invocation did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// No `git` on `PATH`.
    #[error("git executable not found in PATH")]
    NotFound,

    /// The process could not be started or waited on.
    #[error("could not run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// git ran and exited unsuccessfully.
    #[error("git {command} failed: {message}")]
    Failed {
        /// Subcommand, e.g. `push`.
        command: String,
        /// Trimmed stderr, or a description of the exit status when stderr
        /// went to the terminal.
        message: String,
        /// Exit status; `None` when killed by a signal.
        status: Option<i32>,
    },
}

impl GitError {
    /// Exit status of a [`GitError::Failed`] run.
    pub fn status(&self) -> Option<i32> {
        match self {
            Self::Failed { status, .. } => *status,
            Self::NotFound | Self::Spawn(_) => None,
        }
    }
}
