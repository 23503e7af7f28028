//! `ghrepo --create-and-push` command.

use anyhow::Result;

use ghrepo_api::repos::{CreateRepoInput, create_user_repo};
use ghrepo_core::cmdutil::SilentError;
use ghrepo_core::iostreams::ColorScheme;
use ghrepo_core::{IOStreams, ios_eprintln, ios_println};
use ghrepo_git::GitError;
use tracing::debug;

use crate::factory::Factory;

/// Shown after a 422 from the create endpoint.
pub const CONFLICT_HINT: &str = "Repository with this name already exists or invalid name.";

/// Shown when the create response has no clone URL.
pub const MISSING_URL_MESSAGE: &str = "Failed to get repository URL after creation.";

/// Create a private repository and push the current checkout to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    /// Name of the new repository.
    pub name: String,
}

impl CreateOptions {
    /// Run the create-and-push command.
    ///
    /// The remote repository is left in place if a git step fails.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        let ios = &factory.io;
        let cs = ios.color_scheme();
        let settings = factory.settings();

        let local = match factory.local_repo() {
            Ok(local) => local,
            Err(e) => return Err(git_failure(ios, cs, &e)),
        };

        let credential = factory.credential()?;
        let client = factory.api_client(&credential)?;

        let input = CreateRepoInput::private(self.name.as_str(), settings.description.as_str());
        let created = match create_user_repo(&client, &input).await {
            Ok(created) => created,
            Err(e) => {
                ios_eprintln!(
                    ios,
                    "{} Error creating repository {}: {e}",
                    cs.error_icon(),
                    self.name
                );
                if e.is_unprocessable() {
                    ios_eprintln!(ios, "{CONFLICT_HINT}");
                }
                return Err(SilentError.into());
            }
        };
        ios_println!(
            ios,
            "{} Successfully created private repository: {}",
            cs.success_icon(),
            self.name
        );

        let url = match created.clone_url() {
            Ok(url) => url,
            Err(e) => {
                debug!(error = %e, "create response without clone URL");
                ios_eprintln!(ios, "{} {MISSING_URL_MESSAGE}", cs.error_icon());
                return Err(SilentError.into());
            }
        };

        ios_println!(ios, "Adding remote {}: {url}", settings.remote_name);
        if let Err(e) = local.add_remote(&settings.remote_name, url).await {
            return Err(git_failure(ios, cs, &e));
        }

        ios_println!(ios, "Pushing to GitHub...");
        if let Err(e) = local
            .push_upstream(&settings.remote_name, &settings.primary_branch)
            .await
        {
            return Err(git_failure(ios, cs, &e));
        }

        ios_println!(ios, "{} Successfully pushed to {url}", cs.success_icon());
        Ok(())
    }
}

fn git_failure(ios: &IOStreams, cs: ColorScheme, err: &GitError) -> anyhow::Error {
    ios_eprintln!(ios, "{} Error during git operations: {err}", cs.error_icon());
    SilentError.into()
}

#[cfg(test)]
mod tests {
    use ghrepo_core::cmdutil::is_silent;
    use ghrepo_git::{GitCall, StubLocalRepo};
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::test_helpers::{TestHarness, mock_rest_post};

    const CLONE_URL: &str = "https://github.com/octocat/demo.git";

    fn demo() -> CreateOptions {
        CreateOptions {
            name: "demo".to_string(),
        }
    }

    async fn mock_created(h: &TestHarness) {
        mock_rest_post(
            &h.server,
            "/user/repos",
            201,
            serde_json::json!({"full_name": "octocat/demo", "clone_url": CLONE_URL}),
        )
        .await;
    }

    #[tokio::test]
    async fn test_should_create_repo_add_remote_and_push() {
        let h = TestHarness::new().await;
        mock_created(&h).await;

        demo().run(&h.factory).await.unwrap();

        assert_eq!(
            h.git.mutating_calls(),
            vec![
                GitCall::AddRemote {
                    name: "origin".to_string(),
                    url: CLONE_URL.to_string(),
                },
                GitCall::Push {
                    remote: "origin".to_string(),
                    branch: "master".to_string(),
                },
            ]
        );
        assert_eq!(
            h.stdout(),
            format!(
                "✓ Successfully created private repository: demo\n\
                 Adding remote origin: {CLONE_URL}\n\
                 Pushing to GitHub...\n\
                 ✓ Successfully pushed to {CLONE_URL}\n"
            )
        );
        assert!(h.stderr().is_empty());
    }

    #[tokio::test]
    async fn test_should_send_private_repository_body() {
        let h = TestHarness::new().await;
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .and(body_json(serde_json::json!({
                "name": "demo",
                "private": true,
                "description": h.factory.settings().description,
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"clone_url": CLONE_URL})),
            )
            .expect(1)
            .mount(&h.server)
            .await;

        demo().run(&h.factory).await.unwrap();
    }

    #[tokio::test]
    async fn test_should_use_clone_url_unmodified() {
        let h = TestHarness::new().await;
        let odd_url = "https://ghe.example.com/scm/Octo%20Cat/demo.git";
        mock_rest_post(
            &h.server,
            "/user/repos",
            201,
            serde_json::json!({"clone_url": odd_url}),
        )
        .await;

        demo().run(&h.factory).await.unwrap();

        assert!(h.git.mutating_calls().contains(&GitCall::AddRemote {
            name: "origin".to_string(),
            url: odd_url.to_string(),
        }));
    }

    #[tokio::test]
    async fn test_should_report_conflict_without_touching_git() {
        let h = TestHarness::new().await;
        mock_rest_post(
            &h.server,
            "/user/repos",
            422,
            serde_json::json!({"message": "Repository creation failed."}),
        )
        .await;

        let err = demo().run(&h.factory).await.unwrap_err();

        assert!(is_silent(&err));
        assert_eq!(
            h.stderr(),
            format!(
                "X Error creating repository demo: HTTP 422: Repository creation failed.\n{CONFLICT_HINT}\n"
            )
        );
        assert!(h.git.mutating_calls().is_empty());
        assert!(h.stdout().is_empty());
    }

    #[tokio::test]
    async fn test_should_not_show_conflict_hint_for_other_errors() {
        let h = TestHarness::new().await;
        mock_rest_post(
            &h.server,
            "/user/repos",
            401,
            serde_json::json!({"message": "Bad credentials"}),
        )
        .await;

        let err = demo().run(&h.factory).await.unwrap_err();

        assert!(is_silent(&err));
        assert!(!h.stderr().contains(CONFLICT_HINT));
        assert!(h.git.mutating_calls().is_empty());
    }

    #[tokio::test]
    async fn test_should_fail_when_clone_url_is_missing() {
        let h = TestHarness::new().await;
        mock_rest_post(
            &h.server,
            "/user/repos",
            201,
            serde_json::json!({"full_name": "octocat/demo"}),
        )
        .await;

        let err = demo().run(&h.factory).await.unwrap_err();

        assert!(is_silent(&err));
        assert!(h.stdout().contains("Successfully created private repository: demo"));
        assert!(h.stderr().contains(MISSING_URL_MESSAGE));
        assert!(h.git.mutating_calls().is_empty());
    }

    #[tokio::test]
    async fn test_should_stop_after_failed_remote_add() {
        let h = TestHarness::with_local_repo(StubLocalRepo::new().failing_add_remote()).await;
        mock_created(&h).await;

        let err = demo().run(&h.factory).await.unwrap_err();

        assert!(is_silent(&err));
        assert!(
            h.stderr()
                .starts_with("X Error during git operations: git remote failed:")
        );
        assert_eq!(h.git.mutating_calls().len(), 1);
        assert!(!h.stdout().contains("Pushing to GitHub..."));
    }

    #[tokio::test]
    async fn test_should_report_failed_push() {
        let h = TestHarness::with_local_repo(StubLocalRepo::new().failing_push()).await;
        mock_created(&h).await;

        let err = demo().run(&h.factory).await.unwrap_err();

        assert!(is_silent(&err));
        assert!(h.stdout().contains("Pushing to GitHub..."));
        assert!(!h.stdout().contains("Successfully pushed"));
        assert_eq!(
            h.stderr(),
            "X Error during git operations: git push failed: exit status 1\n"
        );
    }
}
