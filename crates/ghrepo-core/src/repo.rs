//! Repository reference.

use std::fmt;

use crate::errors::CoreError;

/// A GitHub repository identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    /// Create a repository reference.
    ///
    /// Each part must map to exactly one URL path segment: non-empty, not
    /// `.` or `..`, and without `/`. Other characters are kept as typed and
    /// percent-encoded when the request URL is built.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRepoName`] for a part that fails the rule.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, CoreError> {
        let owner = owner.into();
        let name = name.into();
        check_part(&owner)?;
        check_part(&name)?;
        Ok(Self { owner, name })
    }

    /// Repository owner (user or organization login).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `OWNER/NAME`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

fn check_part(part: &str) -> Result<(), CoreError> {
    let reason = if part.is_empty() {
        "must not be empty"
    } else if part == "." || part == ".." {
        "must not be a relative path component"
    } else if part.contains('/') {
        "must not contain '/'"
    } else {
        return Ok(());
    };
    Err(CoreError::InvalidRepoName {
        name: part.to_string(),
        reason,
    })
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
