//! `ghrepo --repos` command.

use anyhow::Result;

use ghrepo_api::ApiError;
use ghrepo_api::repos::delete_repo;
use ghrepo_core::RepoRef;
use ghrepo_core::cmdutil::SilentError;
use ghrepo_core::{ios_eprintln, ios_println};
use tracing::debug;

use crate::factory::Factory;
use crate::owner::resolve_owner;

/// Shown after a 404 from the delete endpoint.
pub const NOT_FOUND_HINT: &str =
    "Repository not found. It might have already been deleted or the name/owner is incorrect.";

/// Shown after a 403 from the delete endpoint.
pub const FORBIDDEN_HINT: &str = "Forbidden. Check if your token has the 'delete_repo' scope.";

/// Delete repositories, one typed confirmation each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOptions {
    /// Repository names, processed in order.
    pub repos: Vec<String>,
    /// Owner; git `user.name` when absent.
    pub owner: Option<String>,
}

impl DeleteOptions {
    /// Run the delete command.
    ///
    /// Every name is checked before anything is prompted or sent. Stops at
    /// the first failed deletion; repositories after it are not touched.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        let ios = &factory.io;
        let cs = ios.color_scheme();

        let local = factory
            .local_repo()
            .inspect_err(|e| debug!(error = %e, "git client unavailable"))
            .ok();
        let owner = resolve_owner(self.owner.as_deref(), local.as_deref()).await?;
        let targets = self
            .repos
            .iter()
            .map(|name| RepoRef::new(owner.as_str(), name.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        let credential = factory.credential()?;
        let client = factory.api_client(&credential)?;
        let prompter = factory.prompter();

        ios_println!(ios, "Attempting to delete repositories for owner: {owner}");

        for repo in &targets {
            let answer = prompter.input(&confirmation_prompt(&repo))?;

            if !is_affirmative(&answer) {
                ios_println!(ios, "Skipping deletion of {repo}.");
                continue;
            }

            match delete_repo(&client, &repo).await {
                Ok(()) => {
                    ios_println!(
                        ios,
                        "{} Successfully deleted repository: {repo}",
                        cs.success_icon()
                    );
                }
                Err(e) => {
                    ios_eprintln!(
                        ios,
                        "{} Error deleting repository {repo}: {e}",
                        cs.error_icon()
                    );
                    if let Some(hint) = delete_hint(&e) {
                        ios_eprintln!(ios, "{hint}");
                    }
                    return Err(SilentError.into());
                }
            }
        }

        Ok(())
    }
}

/// Prompt shown before deleting `repo`.
pub fn confirmation_prompt(repo: &RepoRef) -> String {
    format!(
        "Are you sure you want to delete '{}'? This action cannot be undone. Type 'yes' to confirm",
        repo.full_name()
    )
}

/// Whether a confirmation answer allows the deletion.
///
/// Only `yes` in any letter case counts; surrounding whitespace does not.
pub fn is_affirmative(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("yes")
}

fn delete_hint(err: &ApiError) -> Option<&'static str> {
    if err.is_not_found() {
        Some(NOT_FOUND_HINT)
    } else if err.is_forbidden() {
        Some(FORBIDDEN_HINT)
    } else {
        None
    }
}
