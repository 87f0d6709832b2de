//! # Country Service
//!
//! The cache-or-fetch pipeline shared by the list and detail controllers.
//!
//! ```text
//! load_all()          allCountries.json ──hit──▶ Vec<Country>
//!                            │ miss
//!                            ▼
//!                     source.fetch_all_countries() ─▶ transform ─▶ cache_populate
//!
//! load_details(name)  saved/<name>.json ─▶ <name>.json ─▶ source.fetch_country_by_name()
//! ```
//!
//! Loads for the same key are serialized by a per-key async mutex, so a
//! second caller waits for the first and then hits the cache it wrote.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};

use crate::core::model::{Country, CountryDetails};
use crate::core::store::{ALL_COUNTRIES_KEY, LocalStore, StoreError};
use crate::core::transform::{to_country_details, to_country_list};
use crate::countries::{CountrySource, SourceError};

/// Subdirectory of the data dir holding explicit user saves.
pub const SAVED_DIR: &str = "saved";

/// Failure of an orchestration operation.
#[derive(Debug)]
pub enum LoadError {
    Source(SourceError),
    Store(StoreError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Source(e) => write!(f, "{e}"),
            LoadError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Source(e) => Some(e),
            LoadError::Store(e) => Some(e),
        }
    }
}

impl From<SourceError> for LoadError {
    fn from(e: SourceError) -> Self {
        LoadError::Source(e)
    }
}

impl From<StoreError> for LoadError {
    fn from(e: StoreError) -> Self {
        LoadError::Store(e)
    }
}

/// Where a loaded entity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Saved,
    Cache,
    Remote,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    pub origin: Origin,
}

pub struct CountryService {
    source: Arc<dyn CountrySource>,
    cache: LocalStore,
    saved: LocalStore,
    in_flight: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl CountryService {
    pub fn new(source: Arc<dyn CountrySource>, cache: LocalStore, saved: LocalStore) -> Self {
        Self {
            source,
            cache,
            saved,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Opens the cache at `data_dir` and the saved store at `data_dir/saved`.
    pub fn open(source: Arc<dyn CountrySource>, data_dir: &Path) -> Result<Self, StoreError> {
        let cache = LocalStore::open(data_dir)?;
        let saved = LocalStore::open(data_dir.join(SAVED_DIR))?;
        Ok(Self::new(source, cache, saved))
    }

    pub fn cache(&self) -> &LocalStore {
        &self.cache
    }

    pub fn saved(&self) -> &LocalStore {
        &self.saved
    }

    /// Returns the guard for `key`, creating it on first use.
    fn key_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut in_flight = match self.in_flight.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        in_flight.entry(key.to_string()).or_default().clone()
    }

    /// All countries: cache if present (no freshness check), else remote.
    pub async fn load_all(&self) -> Result<Loaded<Vec<Country>>, LoadError> {
        let lock = self.key_lock(ALL_COUNTRIES_KEY);
        let _guard = lock.lock().await;

        if self.cache.exists(ALL_COUNTRIES_KEY) {
            let countries: Vec<Country> = self.cache.read(ALL_COUNTRIES_KEY)?;
            info!("Loaded {} countries from cache", countries.len());
            return Ok(Loaded {
                value: countries,
                origin: Origin::Cache,
            });
        }

        info!("No country cache, fetching from {}", self.source.name());
        let responses = self.source.fetch_all_countries().await?;
        let countries = to_country_list(&responses);
        debug!("Transformed {} countries", countries.len());
        self.cache.cache_populate(ALL_COUNTRIES_KEY, &countries)?;

        Ok(Loaded {
            value: countries,
            origin: Origin::Remote,
        })
    }

    /// One country's details: saved snapshot, then cache, then remote.
    pub async fn load_details(&self, name: &str) -> Result<Loaded<CountryDetails>, LoadError> {
        let lock = self.key_lock(name);
        let _guard = lock.lock().await;

        if self.saved.exists(name) {
            debug!("Details for '{}' from saved store", name);
            return Ok(Loaded {
                value: self.saved.read(name)?,
                origin: Origin::Saved,
            });
        }
        if self.cache.exists(name) {
            debug!("Details for '{}' from cache", name);
            return Ok(Loaded {
                value: self.cache.read(name)?,
                origin: Origin::Cache,
            });
        }

        info!("No cached details for '{}', fetching", name);
        let matches = self.source.fetch_country_by_name(name).await?;
        if matches.len() > 1 {
            debug!(
                "'{}' matched {} countries, preferring an exact official name",
                name,
                matches.len()
            );
        }
        // `/name` is a substring search; an exact official-name hit beats index 0
        let chosen = matches
            .iter()
            .find(|m| m.name.official.eq_ignore_ascii_case(name))
            .or_else(|| matches.first())
            .ok_or(SourceError::Empty)?;
        let details = to_country_details(chosen);

        self.cache.cache_populate(details.key(), &details)?;
        if details.key() != name {
            warn!(
                "Requested '{}' but API returned '{}'; caching under both",
                name,
                details.key()
            );
            self.cache.cache_populate(name, &details)?;
        }

        Ok(Loaded {
            value: details,
            origin: Origin::Remote,
        })
    }

    pub fn is_saved(&self, key: &str) -> bool {
        self.saved.exists(key)
    }

    /// Stores the snapshot as a user save, replacing any earlier one.
    pub fn save(&self, details: &CountryDetails) -> Result<(), StoreError> {
        info!("Saving '{}'", details.key());
        self.saved.user_save(details.key(), details)
    }

    /// Removes the user save for `key`. Returns whether one existed.
    pub fn unsave(&self, key: &str) -> Result<bool, StoreError> {
        info!("Unsaving '{}'", key);
        self.saved.delete(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        FakeSource, kenya_details, niger_and_nigeria, sample_countries, service_with,
    };

    #[tokio::test]
    async fn test_load_all_fetches_once_then_persists() {
        let source = FakeSource::with_countries(sample_countries());
        let (_dir, service) = service_with(source.clone());

        assert!(!service.cache().exists(ALL_COUNTRIES_KEY));
        let loaded = service.load_all().await.unwrap();

        assert_eq!(loaded.origin, Origin::Remote);
        assert_eq!(loaded.value.len(), 3);
        assert_eq!(source.all_calls(), 1);
        assert!(service.cache().exists(ALL_COUNTRIES_KEY));

        let cached: Vec<Country> = service.cache().read(ALL_COUNTRIES_KEY).unwrap();
        assert_eq!(cached, loaded.value);
    }

    #[tokio::test]
    async fn test_load_all_uses_cache_without_network() {
        let source = FakeSource::with_countries(sample_countries());
        let (_dir, service) = service_with(source.clone());

        service.load_all().await.unwrap();
        let second = service.load_all().await.unwrap();

        assert_eq!(second.origin, Origin::Cache);
        assert_eq!(source.all_calls(), 1);
    }

    #[tokio::test]
    async fn test_load_all_failure_writes_nothing() {
        let source = FakeSource::failing(SourceError::Timeout);
        let (_dir, service) = service_with(source.clone());

        let result = service.load_all().await;
        assert!(matches!(result, Err(LoadError::Source(SourceError::Timeout))));
        assert!(!service.cache().exists(ALL_COUNTRIES_KEY));
    }

    #[tokio::test]
    async fn test_cached_details_skip_remote() {
        let source = FakeSource::with_countries(sample_countries());
        let (_dir, service) = service_with(source.clone());
        service.cache().write("Kenya", &kenya_details()).unwrap();

        let loaded = service.load_details("Kenya").await.unwrap();
        assert_eq!(loaded.origin, Origin::Cache);
        assert_eq!(loaded.value.capital, "Nairobi");
        assert_eq!(source.by_name_calls(), 0);
    }

    #[tokio::test]
    async fn test_remote_details_populate_cache_not_saved() {
        let source = FakeSource::with_countries(sample_countries());
        let (_dir, service) = service_with(source.clone());

        let loaded = service.load_details("Republic of Kenya").await.unwrap();
        assert_eq!(loaded.origin, Origin::Remote);
        assert_eq!(source.by_name_calls(), 1);
        assert!(service.cache().exists("Republic of Kenya"));
        assert!(!service.is_saved("Republic of Kenya"));
    }

    #[tokio::test]
    async fn test_saved_snapshot_wins_over_cache() {
        let source = FakeSource::with_countries(sample_countries());
        let (_dir, service) = service_with(source.clone());
        let cached = kenya_details();
        let saved = CountryDetails {
            population: 1,
            ..kenya_details()
        };
        service.cache().write(cached.key(), &cached).unwrap();
        service.save(&saved).unwrap();

        let loaded = service.load_details(cached.key()).await.unwrap();
        assert_eq!(loaded.origin, Origin::Saved);
        assert_eq!(loaded.value.population, 1);
    }

    #[tokio::test]
    async fn test_concurrent_loads_for_same_key_fetch_once() {
        let source = FakeSource::with_countries(sample_countries()).delayed();
        let (_dir, service) = service_with(source.clone());
        let service = Arc::new(service);

        let a = tokio::spawn({
            let service = service.clone();
            async move { service.load_details("Republic of Kenya").await }
        });
        let b = tokio::spawn({
            let service = service.clone();
            async move { service.load_details("Republic of Kenya").await }
        });

        let (a, b) = (a.await.unwrap().unwrap(), b.await.unwrap().unwrap());
        assert_eq!(a.value, b.value);
        assert_eq!(source.by_name_calls(), 1);
    }

    #[tokio::test]
    async fn test_exact_official_match_beats_first_result() {
        let source = FakeSource::with_countries(niger_and_nigeria()).substring_search();
        let (_dir, service) = service_with(source.clone());

        let first = service.load_details("Republic of Niger").await.unwrap();
        assert_eq!(first.origin, Origin::Remote);
        assert_eq!(first.value.capital, "Niamey");

        for _ in 0..2 {
            let again = service.load_details("Republic of Niger").await.unwrap();
            assert_eq!(again.origin, Origin::Cache);
            assert_eq!(again.value.official_name, "Republic of Niger");
        }
        assert_eq!(source.by_name_calls(), 1);
        assert!(!service.cache().exists("Federal Republic of Nigeria"));
    }

    #[tokio::test]
    async fn test_details_cached_under_requested_name_when_it_differs() {
        let source = FakeSource::with_countries(vec![niger_and_nigeria().remove(1)])
            .substring_search();
        let (_dir, service) = service_with(source.clone());

        let first = service.load_details("Niger").await.unwrap();
        assert_eq!(first.origin, Origin::Remote);
        assert!(service.cache().exists("Niger"));
        assert!(service.cache().exists("Republic of Niger"));

        let again = service.load_details("Niger").await.unwrap();
        assert_eq!(again.origin, Origin::Cache);
        assert_eq!(again.value, first.value);
        assert_eq!(source.by_name_calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_name_surfaces_not_found() {
        let source = FakeSource::with_countries(sample_countries());
        let (_dir, service) = service_with(source);

        let result = service.load_details("Atlantis").await;
        assert!(matches!(
            result,
            Err(LoadError::Source(SourceError::NotFound(name))) if name == "Atlantis"
        ));
    }

    #[test]
    fn test_save_then_unsave() {
        let source = FakeSource::with_countries(sample_countries());
        let (_dir, service) = service_with(source);
        let details = kenya_details();

        service.save(&details).unwrap();
        assert!(service.is_saved(details.key()));
        assert!(service.unsave(details.key()).unwrap());
        assert!(!service.is_saved(details.key()));
        assert!(!service.unsave(details.key()).unwrap());
    }
}
