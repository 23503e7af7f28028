//! HTTP client construction.
//!
//! Provides the default `User-Agent` and `Accept` headers sent with every
//! request.

use reqwest::header::{self, HeaderMap, HeaderValue};

/// Media type for the v3 REST API.
pub const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// Options for constructing an HTTP client.
#[derive(Debug)]
pub struct HttpClientOptions {
    /// Application version for User-Agent.
    pub app_version: String,
}

/// Build a reqwest client with default configuration.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed.
pub fn build_client(opts: &HttpClientOptions) -> anyhow::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_str(&user_agent(&opts.app_version))?,
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT_V3));

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .build()?;

    Ok(client)
}

/// `User-Agent` value for a given version.
pub fn user_agent(app_version: &str) -> String {
    format!("ghrepo {app_version}")
}

/// Format an authorization header value from a token.
pub fn auth_header_value(token: &str) -> String {
    format!("token {token}")
}
