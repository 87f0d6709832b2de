//! REST Countries implementation of `CountrySource`.
//!
//! Two read-only endpoints, no auth:
//! - `GET {base}/all?fields=name,capital,flags`
//! - `GET {base}/name/{name}`

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::countries::{CountryDetailsResponse, CountryResponse, CountrySource, SourceError};

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Fields requested for the list screen. Everything else stays on the server.
const LIST_FIELDS: &str = "name,capital,flags";

pub struct RestCountriesSource {
    base_url: Url,
    client: reqwest::Client,
}

impl RestCountriesSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        // A trailing slash makes Url::join/path_segments_mut treat the base as a directory
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| SourceError::Config(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SourceError::Config(format!(
                "base URL '{base_url}' cannot carry a path"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Builds `{base}/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        debug!("{} -> {}", url, status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(classify_status(status, body));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!("Undecodable body from {}: {}", url, e);
            SourceError::Parse(e.to_string())
        })
    }
}

/// Maps a non-success status to an error. 404 is handled by the caller,
/// which knows what was being looked up.
fn classify_status(status: StatusCode, body: String) -> SourceError {
    warn!("Countries API error: {} - {}", status, body);
    SourceError::Api {
        status: status.as_u16(),
        message: body,
    }
}

#[async_trait]
impl CountrySource for RestCountriesSource {
    fn name(&self) -> &str {
        "restcountries"
    }

    async fn fetch_all_countries(&self) -> Result<Vec<CountryResponse>, SourceError> {
        let mut url = self.endpoint(&["all"]);
        url.query_pairs_mut().append_pair("fields", LIST_FIELDS);

        let countries: Vec<CountryResponse> = self.get_json(url).await?;
        info!("Fetched {} countries", countries.len());
        Ok(countries)
    }

    async fn fetch_country_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<CountryDetailsResponse>, SourceError> {
        let url = self.endpoint(&["name", name]);

        let matches: Vec<CountryDetailsResponse> = match self.get_json(url).await {
            Ok(matches) => matches,
            Err(SourceError::Api { status: 404, .. }) => {
                return Err(SourceError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e),
        };

        if matches.is_empty() {
            return Err(SourceError::Empty);
        }
        info!("Fetched details for '{}' ({} match(es))", name, matches.len());
        Ok(matches)
    }
}
