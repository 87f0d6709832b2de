//! # Actions
//!
//! Everything that can happen in atlas becomes an `Action`.
//! User presses Enter on a country? That's `Action::SelectCountry(index)`.
//! Details arrive from a background task? That's `Action::DetailsLoaded { .. }`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` telling the front end what I/O to start. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::model::{Country, CountryDetails};
use crate::core::service::{LoadError, Loaded, Origin};
use crate::core::state::{App, Screen};

#[derive(Debug)]
pub enum Action {
    /// Load the country list (first start, or retry after a failure).
    LoadCountries,
    CountriesLoaded(Result<Loaded<Vec<Country>>, LoadError>),
    /// Search box contents changed.
    SearchChanged(String),
    /// Open the visible country at this index.
    SelectCountry(usize),
    DetailsLoaded {
        name: String,
        result: Result<Loaded<CountryDetails>, LoadError>,
        saved: bool,
    },
    ToggleSave,
    /// Leave the detail view.
    Back,
    Quit,
}

/// Side effect the front end must perform after `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    FetchCountries,
    FetchDetails(String),
    ToggleSave,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::LoadCountries => {
            if app.list.begin_load() {
                app.status_message = "Loading countries...".to_string();
                Effect::FetchCountries
            } else {
                Effect::None
            }
        }
        Action::CountriesLoaded(result) => {
            match result {
                Ok(loaded) => {
                    let count = loaded.value.len();
                    app.list.finish_load(loaded.value);
                    app.status_message = match loaded.origin {
                        Origin::Remote => format!("{count} countries"),
                        Origin::Cache | Origin::Saved => format!("{count} countries (offline copy)"),
                    };
                }
                Err(e) => {
                    app.list.fail_load(&e);
                    app.status_message = format!("Error: {e} (press r to retry)");
                }
            }
            Effect::None
        }
        Action::SearchChanged(query) => {
            if app.list.search_enabled() {
                app.list.filter(&query);
            }
            Effect::None
        }
        Action::SelectCountry(index) => match app.list.begin_select(index) {
            Some(name) => {
                app.detail.begin_load(&name);
                app.status_message = format!("Loading {name}...");
                Effect::FetchDetails(name)
            }
            None => Effect::None,
        },
        Action::DetailsLoaded {
            name,
            result,
            saved,
        } => {
            if !app.detail.awaiting(&name) {
                debug!("Dropping stale details for '{}'", name);
                return Effect::None;
            }
            match result {
                Ok(loaded) => {
                    app.list.finish_select();
                    app.detail.finish_load(loaded, saved);
                    app.screen = Screen::Detail;
                    app.status_message = name;
                }
                Err(e) => {
                    app.list.fail_select(&e);
                    app.detail.fail_load(&e);
                    app.status_message = format!("Error: {e}");
                }
            }
            Effect::None
        }
        Action::ToggleSave => {
            if app.screen == Screen::Detail && app.detail.details().is_some() {
                Effect::ToggleSave
            } else {
                Effect::None
            }
        }
        Action::Back => {
            if app.screen == Screen::Detail {
                app.screen = Screen::List;
                app.list.resume();
                app.status_message = format!("{} countries", app.list.all().len());
            }
            Effect::None
        }
        Action::Quit => {
            info!("Quit requested");
            Effect::Quit
        }
    }
}
