//! # Detail Controller
//!
//! Holds the country being viewed and whether the user saved it.
//! "Saved" is a pure function of the saved store: a snapshot file exists for
//! the country's official name. Viewing a country only populates the cache.

use log::{debug, info, warn};

use crate::core::model::CountryDetails;
use crate::core::service::{CountryService, LoadError, Loaded, Origin};
use crate::core::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPhase {
    Idle,
    /// Waiting for the details of this name.
    Loading(String),
    Loaded,
    Failed,
}

/// Icon shown on the save button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveIcon {
    Saved,
    NotSaved,
}

impl SaveIcon {
    pub fn symbol(&self) -> &'static str {
        match self {
            SaveIcon::Saved => "★",
            SaveIcon::NotSaved => "☆",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SaveIcon::Saved => "Saved",
            SaveIcon::NotSaved => "Not saved",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetailController {
    phase: DetailPhase,
    details: Option<CountryDetails>,
    origin: Option<Origin>,
    saved: bool,
    error: Option<String>,
}

impl Default for DetailController {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailController {
    pub fn new() -> Self {
        Self {
            phase: DetailPhase::Idle,
            details: None,
            origin: None,
            saved: false,
            error: None,
        }
    }

    pub fn phase(&self) -> &DetailPhase {
        &self.phase
    }

    pub fn details(&self) -> Option<&CountryDetails> {
        self.details.as_ref()
    }

    pub fn origin(&self) -> Option<Origin> {
        self.origin
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn save_icon(&self) -> SaveIcon {
        if self.saved {
            SaveIcon::Saved
        } else {
            SaveIcon::NotSaved
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a load for `name` is outstanding. Results for any other
    /// name are stale and should be dropped.
    pub fn awaiting(&self, name: &str) -> bool {
        matches!(&self.phase, DetailPhase::Loading(pending) if pending == name)
    }

    pub fn begin_load(&mut self, name: &str) {
        self.phase = DetailPhase::Loading(name.to_string());
        self.error = None;
    }

    /// `saved` is whether the saved store holds this country right now.
    pub fn finish_load(&mut self, loaded: Loaded<CountryDetails>, saved: bool) {
        debug!(
            "Details for '{}' ready ({:?}, saved={})",
            loaded.value.official_name, loaded.origin, saved
        );
        self.details = Some(loaded.value);
        self.origin = Some(loaded.origin);
        self.saved = saved;
        self.phase = DetailPhase::Loaded;
    }

    pub fn fail_load(&mut self, error: &LoadError) {
        warn!("Loading details failed: {}", error);
        self.phase = DetailPhase::Failed;
        self.error = Some(error.to_string());
    }

    /// Loads `name` through the cache-or-fetch pipeline.
    pub async fn load_details(
        &mut self,
        name: &str,
        service: &CountryService,
    ) -> Result<(), LoadError> {
        self.begin_load(name);
        match service.load_details(name).await {
            Ok(loaded) => {
                let saved = service.is_saved(loaded.value.key());
                self.finish_load(loaded, saved);
                Ok(())
            }
            Err(e) => {
                self.fail_load(&e);
                Err(e)
            }
        }
    }

    /// Flips the saved state: unsaved → snapshot written, saved → snapshot
    /// deleted. Returns the new state. Without loaded details this does nothing.
    pub fn toggle_save(&mut self, service: &CountryService) -> Result<bool, StoreError> {
        let Some(details) = &self.details else {
            debug!("Toggle save with nothing loaded");
            return Ok(self.saved);
        };

        // The store is the source of truth; the flag may be stale if another
        // screen changed it.
        if service.is_saved(details.key()) {
            service.unsave(details.key())?;
            self.saved = false;
        } else {
            service.save(details)?;
            self.saved = true;
        }
        info!("'{}' saved={}", details.key(), self.saved);
        Ok(self.saved)
    }

    /// Text rows of the detail view, top to bottom.
    pub fn display_lines(&self) -> Vec<String> {
        match &self.details {
            Some(d) => format_details(d),
            None => vec!["Country details not available".to_string()],
        }
    }
}

pub fn format_details(d: &CountryDetails) -> Vec<String> {
    vec![
        format!("{} ({})", d.common_name, d.official_name),
        format!("Capital: {}", d.capital),
        format!("Currency: {} ({})", d.currency_name, d.currency_symbol),
        format!("Region: {}", d.region),
        format!("Subregion: {}", d.subregion),
        format!("Languages: {}", d.languages.names().collect::<Vec<_>>().join(", ")),
        format!("Population: {}", d.population),
        format!("Timezone: {}", d.timezone),
        format!("Google Maps: {}", d.google_maps_link),
        format!("Flag: {}", d.flag_png),
    ]
}
