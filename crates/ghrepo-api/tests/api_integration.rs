//! Integration tests for the repository endpoints.
//!
//! Uses wiremock to simulate GitHub API responses with realistic JSON
//! fixtures to test the full request/response cycle.

use serde_json::Value;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ghrepo_api::client::Client;
use ghrepo_api::http::{HttpClientOptions, build_client};
use ghrepo_api::repos::{CreateRepoInput, create_user_repo, delete_repo};
use ghrepo_core::RepoRef;

/// Load a JSON fixture file from the fixtures directory.
fn load_fixture(name: &str) -> Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {path}: {e}"));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("failed to parse fixture {path}: {e}"))
}

fn create_client(server: &MockServer) -> Client {
    let http = build_client(&HttpClientOptions {
        app_version: "9.9.9".to_string(),
    })
    .unwrap();
    Client::new(http, &server.uri(), "test-token".into())
}

#[tokio::test]
async fn test_should_delete_repo_with_default_headers() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/acme/foo"))
        .and(header("Authorization", "token test-token"))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .and(header("User-Agent", "ghrepo 9.9.9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    delete_repo(&create_client(&server), &RepoRef::new("acme", "foo").unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_should_delete_exactly_the_named_repo_when_name_has_url_syntax() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/acme/foo"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/repos/acme/foo%23bar"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/repos/acme/foo%3Fx"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    for name in ["foo#bar", "foo?x"] {
        let err = delete_repo(&client, &RepoRef::new("acme", name).unwrap())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}

#[tokio::test]
async fn test_should_surface_not_found_on_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/acme/gone"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest/repos/repos#delete-a-repository"
            })),
        )
        .mount(&server)
        .await;

    let err = delete_repo(&create_client(&server), &RepoRef::new("acme", "gone").unwrap())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_should_surface_forbidden_on_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/acme/foo"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({"message": "Must have admin rights to Repository."})),
        )
        .mount(&server)
        .await;

    let err = delete_repo(&create_client(&server), &RepoRef::new("acme", "foo").unwrap())
        .await
        .unwrap_err();
    assert!(err.is_forbidden());
    assert!(err.to_string().contains("admin rights"));
}

#[tokio::test]
async fn test_should_create_private_repo_from_fixture() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .and(body_json(serde_json::json!({
            "name": "demo",
            "private": true,
            "description": "Private repository created and published with ghrepo."
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(load_fixture("create_repo.json")))
        .expect(1)
        .mount(&server)
        .await;

    let input = CreateRepoInput::private(
        "demo",
        "Private repository created and published with ghrepo.",
    );
    let created = create_user_repo(&create_client(&server), &input)
        .await
        .unwrap();

    assert_eq!(
        created.clone_url().unwrap(),
        "https://github.com/octocat/demo.git"
    );
    assert_eq!(created.full_name.as_deref(), Some("octocat/demo"));
}

#[tokio::test]
async fn test_should_surface_conflict_on_create() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(load_fixture("create_repo_conflict.json")),
        )
        .mount(&server)
        .await;

    let err = create_user_repo(
        &create_client(&server),
        &CreateRepoInput::private("demo", "d"),
    )
    .await
    .unwrap_err();

    assert!(err.is_unprocessable());
    assert_eq!(err.to_string(), "HTTP 422: Repository creation failed.");
}

#[tokio::test]
async fn test_should_accept_create_response_without_clone_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"name": "demo"})),
        )
        .mount(&server)
        .await;

    let created = create_user_repo(
        &create_client(&server),
        &CreateRepoInput::private("demo", "d"),
    )
    .await
    .unwrap();

    assert!(created.clone_url().is_err());
}
