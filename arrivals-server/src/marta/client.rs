//! MARTA rail realtime HTTP client.

use std::time::Duration;

use super::convert::convert_arrivals;
use super::error::MartaError;
use super::types::{RailArrival, RailArrivalsResponse};
use crate::domain::ArrivalRecord;

/// Default base URL for the MARTA developer services.
pub const DEFAULT_BASE_URL: &str = "https://developerservices.itsmarta.com:18096";

/// Path of the rail arrivals endpoint.
const ARRIVALS_PATH: &str = "railrealtimearrivals";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much of an unparsable body to keep for error messages.
const ERROR_BODY_CHARS: usize = 500;

/// Configuration for the MARTA client.
#[derive(Debug, Clone)]
pub struct MartaConfig {
    /// API key, sent as the `apiKey` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MartaConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing or a proxy).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Full URL of the arrivals endpoint.
    pub fn arrivals_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), ARRIVALS_PATH)
    }
}

/// MARTA rail realtime API client.
///
/// Stateless apart from the HTTP connection pool: each call fetches a fresh,
/// complete snapshot. No retries; the poller simply tries again next tick.
#[derive(Debug, Clone)]
pub struct MartaClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl MartaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MartaConfig) -> Result<Self, MartaError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.arrivals_url(),
            api_key: config.api_key,
        })
    }

    /// Fetch the raw feed rows.
    pub async fn fetch_raw(&self) -> Result<Vec<RailArrival>, MartaError> {
        let response = self
            .http
            .get(&self.url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MartaError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MartaError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MartaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_arrivals(&body)
    }

    /// Fetch and validate a full snapshot.
    pub async fn fetch_arrivals(&self) -> Result<Vec<ArrivalRecord>, MartaError> {
        let rows = self.fetch_raw().await?;
        Ok(convert_arrivals(&rows))
    }
}

/// Parse a feed body, keeping the start of the body on failure.
pub(super) fn parse_arrivals(body: &str) -> Result<Vec<RailArrival>, MartaError> {
    let response: RailArrivalsResponse =
        serde_json::from_str(body).map_err(|e| MartaError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(ERROR_BODY_CHARS).collect()),
        })?;

    Ok(response.into_arrivals())
}
