//! API error types.

/// HTTP API error with status code and message.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Network/transport error.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse API response: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A successful response lacked a field the caller needs.
    #[error("API response is missing `{0}`")]
    MissingField(&'static str),

    /// The request URL could not be built.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Check if this is a 404 Not Found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// Check if this is a 403 Forbidden error.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Http { status: 403, .. })
    }

    /// Check if this is a 422 Unprocessable Entity error.
    pub fn is_unprocessable(&self) -> bool {
        matches!(self, Self::Http { status: 422, .. })
    }
}

/// Pull the human-readable `message` out of a GitHub error body, falling
/// back to the raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
