//! MARTA client error types.

/// Errors from fetching or loading arrival snapshots.
#[derive(Debug, thiserror::Error)]
pub enum MartaError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Invalid or missing API key
    #[error("unauthorized: check MARTA_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by MARTA API")]
    RateLimited,

    /// Local snapshot file could not be read
    #[error("mock data error: {message}")]
    MockData { message: String },
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}
