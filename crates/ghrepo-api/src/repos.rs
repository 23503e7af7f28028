//! Repository endpoints.

use ghrepo_core::RepoRef;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::Client;
use crate::errors::ApiError;

/// Body of `POST user/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRepoInput {
    /// Repository name.
    pub name: String,
    /// Create as private.
    pub private: bool,
    /// Short description.
    pub description: String,
}

impl CreateRepoInput {
    /// A private repository with the given description.
    pub fn private(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            private: true,
            description: description.into(),
        }
    }
}

/// The fields of a create response ghrepo uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedRepo {
    /// `OWNER/NAME` of the new repository.
    #[serde(default)]
    pub full_name: Option<String>,
    /// HTTPS clone URL.
    #[serde(default)]
    pub clone_url: Option<String>,
}

impl CreatedRepo {
    /// The clone URL, which must be present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingField`] when the response carried no URL.
    pub fn clone_url(&self) -> Result<&str, ApiError> {
        self.clone_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(ApiError::MissingField("clone_url"))
    }
}

/// Delete a repository.
///
/// Owner and name are sent as single percent-encoded path segments, so the
/// request always targets exactly `repo`.
///
/// # Errors
///
/// Returns [`ApiError::Http`] for a non-success status (404 when the
/// repository does not exist, 403 when the token lacks `delete_repo`).
pub async fn delete_repo(client: &Client, repo: &RepoRef) -> Result<(), ApiError> {
    client
        .rest_text(
            reqwest::Method::DELETE,
            &["repos", repo.owner(), repo.name()],
            None,
        )
        .await?;
    debug!(repo = %repo, "repository deleted");
    Ok(())
}

/// Create a repository owned by the authenticated user.
///
/// # Errors
///
/// Returns [`ApiError::Http`] for a non-success status (422 when the name is
/// taken or invalid) and [`ApiError::JsonParse`] for an unreadable body.
pub async fn create_user_repo(
    client: &Client,
    input: &CreateRepoInput,
) -> Result<CreatedRepo, ApiError> {
    let body = serde_json::to_value(input)?;
    let created: CreatedRepo = client
        .rest(reqwest::Method::POST, &["user", "repos"], Some(&body))
        .await?;
    debug!(name = %input.name, full_name = ?created.full_name, "repository created");
    Ok(created)
}
