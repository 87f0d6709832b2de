//! # List Controller
//!
//! Owns the full country list, the current search query and the search box
//! state. Front ends render `visible()` and forward keystrokes to `filter()`.
//!
//! ```text
//! Idle ──begin_load──▶ Loading ──finish_load──▶ Loaded ◀──filter(q)──┐
//!                         │                        └─────────────────┘
//!                         └──fail_load──▶ Failed ──begin_load──▶ Loading
//! ```
//!
//! Each async operation is also available as `begin_*` / `finish_*` halves so
//! a front end can run the I/O on a background task and feed the result back.

use log::{debug, info, warn};

use crate::core::detail::DetailController;
use crate::core::model::Country;
use crate::core::service::{CountryService, LoadError, Origin};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    /// The list could not be loaded; there is nothing to show.
    Failed,
}

#[derive(Debug, Clone)]
pub struct ListController {
    phase: ListPhase,
    all: Vec<Country>,
    visible: Vec<Country>,
    query: String,
    search_enabled: bool,
    search_focused: bool,
    /// Last load or selection failure, cleared by the next attempt.
    error: Option<String>,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new()
    }
}

impl ListController {
    pub fn new() -> Self {
        Self {
            phase: ListPhase::Idle,
            all: Vec::new(),
            visible: Vec::new(),
            query: String::new(),
            search_enabled: false,
            search_focused: false,
            error: None,
        }
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    /// Countries matching the current query, in list order.
    pub fn visible(&self) -> &[Country] {
        &self.visible
    }

    pub fn all(&self) -> &[Country] {
        &self.all
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_filtered(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn search_enabled(&self) -> bool {
        self.search_enabled
    }

    pub fn search_focused(&self) -> bool {
        self.search_focused
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enters `Loading` and locks the search box. Returns false if a load is
    /// already running.
    pub fn begin_load(&mut self) -> bool {
        if self.is_loading() {
            debug!("Load already in progress");
            return false;
        }
        self.phase = ListPhase::Loading;
        self.error = None;
        self.lock_search();
        true
    }

    pub fn finish_load(&mut self, countries: Vec<Country>) {
        info!("List loaded with {} countries", countries.len());
        self.all = countries;
        self.phase = ListPhase::Loaded;
        self.apply_filter();
        self.unlock_search();
    }

    pub fn fail_load(&mut self, error: &LoadError) {
        warn!("Loading countries failed: {}", error);
        self.phase = ListPhase::Failed;
        self.error = Some(error.to_string());
        self.unlock_search();
    }

    /// Loads all countries through the cache-or-fetch pipeline.
    /// Returns `Ok(None)` without fetching if a load is already running.
    pub async fn load_all(
        &mut self,
        service: &CountryService,
    ) -> Result<Option<Origin>, LoadError> {
        if !self.begin_load() {
            return Ok(None);
        }
        match service.load_all().await {
            Ok(loaded) => {
                self.finish_load(loaded.value);
                Ok(Some(loaded.origin))
            }
            Err(e) => {
                self.fail_load(&e);
                Err(e)
            }
        }
    }

    /// Case-insensitive prefix match on name or capital, always recomputed
    /// from the full list. An empty query shows everything.
    pub fn filter(&mut self, query: &str) {
        self.query = query.to_string();
        self.apply_filter();
        debug!("Filter '{}' -> {} countries", self.query, self.visible.len());
    }

    fn apply_filter(&mut self) {
        self.visible = self
            .all
            .iter()
            .filter(|c| matches_query(c, &self.query))
            .cloned()
            .collect();
    }

    /// Starts opening the visible country at `index`: locks search and
    /// enters `Loading`. Returns the name to load, or `None` if the index is
    /// out of range or another load is running.
    pub fn begin_select(&mut self, index: usize) -> Option<String> {
        if self.is_loading() {
            return None;
        }
        let name = self.visible.get(index)?.name.clone();
        info!("Selected '{}'", name);
        self.phase = ListPhase::Loading;
        self.error = None;
        self.lock_search();
        Some(name)
    }

    /// Details are ready and the front end is navigating away.
    pub fn finish_select(&mut self) {
        self.phase = ListPhase::Loaded;
    }

    /// Details failed: stay on the list, show the error, give search back.
    pub fn fail_select(&mut self, error: &LoadError) {
        warn!("Opening country failed: {}", error);
        self.phase = ListPhase::Loaded;
        self.error = Some(error.to_string());
        self.unlock_search();
    }

    /// Called when the user comes back from the detail view.
    pub fn resume(&mut self) {
        if self.phase == ListPhase::Loaded {
            self.unlock_search();
        }
    }

    /// Opens the visible country at `index`: loads its details into `detail`.
    /// Returns `Ok(true)` when the front end should navigate to the detail view.
    pub async fn select(
        &mut self,
        index: usize,
        detail: &mut DetailController,
        service: &CountryService,
    ) -> Result<bool, LoadError> {
        let Some(name) = self.begin_select(index) else {
            return Ok(false);
        };
        match detail.load_details(&name, service).await {
            Ok(()) => {
                self.finish_select();
                Ok(true)
            }
            Err(e) => {
                self.fail_select(&e);
                Err(e)
            }
        }
    }

    fn lock_search(&mut self) {
        self.search_enabled = false;
        self.search_focused = false;
    }

    fn unlock_search(&mut self) {
        self.search_enabled = true;
        self.search_focused = true;
    }
}

fn matches_query(country: &Country, query: &str) -> bool {
    starts_with_ignore_case(&country.name, query) || starts_with_ignore_case(&country.capital, query)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut text = text.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| text.next() == Some(p))
}
