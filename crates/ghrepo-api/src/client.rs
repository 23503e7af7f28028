//! GitHub REST client.
//!
//! Thin wrapper over reqwest that appends path segments to the configured API
//! base URL, attaches the token, and turns non-success statuses into
//! [`ApiError::Http`].

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::errors::{ApiError, error_message};
use crate::http::auth_header_value;

/// GitHub API client wrapping reqwest with auth and error handling.
///
/// Tokens are stored as [`SecretString`] to prevent accidental logging or
/// exposure through `Debug` output.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new API client.
    ///
    /// `base_url` is the REST root, e.g. `https://api.github.com/`. A trailing
    /// slash is added when missing.
    pub fn new(http: reqwest::Client, base_url: &str, token: SecretString) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            http,
            base_url,
            token,
        }
    }

    /// REST base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request with authentication headers applied.
    fn authed_request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.http.request(method, url).header(
            reqwest::header::AUTHORIZATION,
            auth_header_value(self.token.expose_secret()),
        )
    }

    /// Execute a REST API request and deserialize the JSON response.
    ///
    /// `segments` are the path below the base URL, one element per segment,
    /// e.g. `["repos", owner, name]`.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or non-success status.
    pub async fn rest<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        segments: &[&str],
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let text = self.rest_text(method, segments, body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Execute a REST API request and return the raw response body as string.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or non-success status.
    pub async fn rest_text(
        &self,
        method: reqwest::Method,
        segments: &[&str],
        body: Option<&Value>,
    ) -> Result<String, ApiError> {
        let url = self.endpoint(segments)?;
        debug!(method = %method, url = %url, "sending API request");
        let resp = self.send_rest_request(method, url, body).await?;
        let resp = Self::check_response(resp).await?;
        Ok(resp.text().await?)
    }

    /// Check a response for errors and return an `ApiError::Http` if the
    /// status is not successful.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        debug!(status = status.as_u16(), "received API response");
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_default();
        let message = error_message(&text);
        Err(ApiError::Http {
            status: status.as_u16(),
            message: if message.is_empty() {
                status.canonical_reason().unwrap_or("error").to_string()
            } else {
                message
            },
        })
    }

    /// Base URL plus `segments`, each percent-encoded as a single segment so
    /// `#`, `?`, `%` and `/` inside a name never alter the request target.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(ApiError::InvalidUrl(format!("bad path segment {bad:?}")));
        }
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_rest_request(
        &self,
        method: reqwest::Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut req = self.authed_request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send().await
    }
}
