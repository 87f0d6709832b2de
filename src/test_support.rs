//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use crate::core::model::CountryDetails;
use crate::core::service::CountryService;
use crate::core::store::LocalStore;
use crate::countries::types::{Flags, OfficialName};
use crate::countries::{CountryDetailsResponse, CountryResponse, CountrySource, SourceError};

/// In-memory `CountrySource` that counts calls per endpoint.
#[derive(Clone)]
pub struct FakeSource {
    countries: Arc<Vec<CountryDetailsResponse>>,
    error: Option<SourceError>,
    delay: Option<Duration>,
    substring: bool,
    all_calls: Arc<AtomicUsize>,
    by_name_calls: Arc<AtomicUsize>,
}

impl FakeSource {
    pub fn with_countries(countries: Vec<CountryDetailsResponse>) -> Self {
        Self {
            countries: Arc::new(countries),
            error: None,
            delay: None,
            substring: false,
            all_calls: Arc::new(AtomicUsize::new(0)),
            by_name_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every call fails with `error`.
    pub fn failing(error: SourceError) -> Self {
        Self {
            error: Some(error),
            ..Self::with_countries(Vec::new())
        }
    }

    /// Sleeps briefly before answering so concurrent callers overlap.
    pub fn delayed(mut self) -> Self {
        self.delay = Some(Duration::from_millis(50));
        self
    }

    /// Match `/name` lookups by substring, in fixture order, the way the
    /// live API does ("Republic of Niger" also hits Nigeria).
    pub fn substring_search(mut self) -> Self {
        self.substring = true;
        self
    }

    pub fn all_calls(&self) -> usize {
        self.all_calls.load(Ordering::SeqCst)
    }

    pub fn by_name_calls(&self) -> usize {
        self.by_name_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CountrySource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_all_countries(&self) -> Result<Vec<CountryResponse>, SourceError> {
        self.all_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if let Some(e) = &self.error {
            return Err(e.clone());
        }
        Ok(self
            .countries
            .iter()
            .map(|c| CountryResponse {
                name: OfficialName {
                    official: c.name.official.clone(),
                },
                capital: c.capital.clone(),
                flags: Flags {
                    png: c.flags.png.clone(),
                },
            })
            .collect())
    }

    async fn fetch_country_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<CountryDetailsResponse>, SourceError> {
        self.by_name_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if let Some(e) = &self.error {
            return Err(e.clone());
        }
        let matches: Vec<CountryDetailsResponse> = self
            .countries
            .iter()
            .filter(|c| {
                if self.substring {
                    let needle = name.to_lowercase();
                    c.name.official.to_lowercase().contains(&needle)
                        || c.name.common.to_lowercase().contains(&needle)
                } else {
                    c.name.official.eq_ignore_ascii_case(name)
                        || c.name.common.eq_ignore_ascii_case(name)
                }
            })
            .cloned()
            .collect();
        if matches.is_empty() {
            return Err(SourceError::NotFound(name.to_string()));
        }
        Ok(matches)
    }
}

fn details_response(json: &str) -> CountryDetailsResponse {
    serde_json::from_str(json).expect("fixture is valid JSON")
}

/// France, Kenya and Antarctica as the API would send them.
pub fn sample_countries() -> Vec<CountryDetailsResponse> {
    vec![
        details_response(
            r#"{
                "flags": {"png": "https://flagcdn.com/w320/fr.png"},
                "name": {"common": "France", "official": "French Republic"},
                "independent": true,
                "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
                "capital": ["Paris"],
                "region": "Europe",
                "subregion": "Western Europe",
                "languages": {"fra": "French"},
                "population": 67391582,
                "timezones": ["UTC-10:00", "UTC+01:00"],
                "maps": {"googleMaps": "https://goo.gl/maps/g7QxxSFsWyTPKuzd7"}
            }"#,
        ),
        details_response(
            r#"{
                "flags": {"png": "https://flagcdn.com/w320/ke.png"},
                "name": {"common": "Kenya", "official": "Republic of Kenya"},
                "independent": true,
                "currencies": {"KES": {"name": "Kenyan shilling", "symbol": "Sh"}},
                "capital": ["Nairobi"],
                "region": "Africa",
                "subregion": "Eastern Africa",
                "languages": {"eng": "English", "swa": "Swahili"},
                "population": 53771300,
                "timezones": ["UTC+03:00"],
                "maps": {"googleMaps": "https://goo.gl/maps/Ni9M7wcCxf8bJHLX8"}
            }"#,
        ),
        details_response(
            r#"{
                "flags": {"png": "https://flagcdn.com/w320/aq.png"},
                "name": {"common": "Antarctica", "official": "Antarctica"},
                "independent": false,
                "region": "Antarctic",
                "population": 1000,
                "timezones": ["UTC-03:00"],
                "maps": {"googleMaps": "https://goo.gl/maps/kyBuJriu4itiXank7"}
            }"#,
        ),
    ]
}

/// Nigeria listed before Niger, as `/name/Republic of Niger` answers.
pub fn niger_and_nigeria() -> Vec<CountryDetailsResponse> {
    vec![
        details_response(
            r#"{
                "name": {"common": "Nigeria", "official": "Federal Republic of Nigeria"},
                "capital": ["Abuja"],
                "region": "Africa"
            }"#,
        ),
        details_response(
            r#"{
                "name": {"common": "Niger", "official": "Republic of Niger"},
                "capital": ["Niamey"],
                "region": "Africa"
            }"#,
        ),
    ]
}

/// Kenya's details as the transformer would produce them.
pub fn kenya_details() -> CountryDetails {
    CountryDetails {
        flag_png: "https://flagcdn.com/w320/ke.png".to_string(),
        common_name: "Kenya".to_string(),
        official_name: "Republic of Kenya".to_string(),
        independent: true,
        currency_name: "Kenyan shilling".to_string(),
        currency_symbol: "Sh".to_string(),
        capital: "Nairobi".to_string(),
        region: "Africa".to_string(),
        subregion: "Eastern Africa".to_string(),
        languages: [("eng", "English"), ("swa", "Swahili")].into_iter().collect(),
        english_translation: "Kenya".to_string(),
        population: 53771300,
        timezone: "UTC+03:00".to_string(),
        google_maps_link: "https://goo.gl/maps/Ni9M7wcCxf8bJHLX8".to_string(),
    }
}

/// A store in a fresh temp dir. Keep the `TempDir` alive for the test's duration.
pub fn temp_store() -> (TempDir, LocalStore) {
    let dir = TempDir::new().expect("temp dir");
    let store = LocalStore::open(dir.path()).expect("open store");
    (dir, store)
}

/// A service over `source` with its data dir in a fresh temp dir.
pub fn service_with(source: FakeSource) -> (TempDir, CountryService) {
    let dir = TempDir::new().expect("temp dir");
    let service = CountryService::open(Arc::new(source), dir.path()).expect("open service");
    (dir, service)
}

/// Creates a test App over the sample countries.
pub fn test_app() -> (TempDir, crate::core::state::App) {
    let (dir, service) = service_with(FakeSource::with_countries(sample_countries()));
    (dir, crate::core::state::App::new(Arc::new(service)))
}
