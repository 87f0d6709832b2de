use std::fmt;

use async_trait::async_trait;

use super::types::{CountryDetailsResponse, CountryResponse};

/// Errors that can occur while talking to the countries API.
/// Variants carry enough info to tell a stalled network from a bad payload.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Source misconfigured (bad base URL, TLS backend unavailable).
    Config(String),
    /// The request did not complete within the configured timeout.
    Timeout,
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// No country matched the requested name (HTTP 404 on `/name`).
    NotFound(String),
    /// API returned a non-success status other than 404.
    Api { status: u16, message: String },
    /// The response body was not the JSON shape we expect.
    Parse(String),
    /// The API answered 200 with an empty list.
    Empty,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Config(msg) => write!(f, "config error: {msg}"),
            SourceError::Timeout => write!(f, "request timed out"),
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::NotFound(name) => write!(f, "no country named '{name}'"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
            SourceError::Empty => write!(f, "API returned no results"),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SourceError::Timeout
        } else if e.is_decode() {
            SourceError::Parse(e.to_string())
        } else {
            SourceError::Network(e.to_string())
        }
    }
}

/// Read-only access to the remote country catalogue.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Returns the name of the source (for logging).
    fn name(&self) -> &str;

    /// Fetches every country with the reduced field set (name, capital, flags).
    async fn fetch_all_countries(&self) -> Result<Vec<CountryResponse>, SourceError>;

    /// Fetches full details for countries matching `name`.
    /// The API may return several matches; callers decide which one to use.
    async fn fetch_country_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<CountryDetailsResponse>, SourceError>;
}
