//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize, or
//!   results arriving from background tasks.
//!
//! Network and disk work runs on tokio tasks; results come back over an
//! mpsc channel as `Action`s and go through `update()` like any key press.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::list::ListPhase;
use crate::core::service::CountryService;
use crate::core::state::{App, Screen};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CountryListState, DetailEvent, DetailViewState, ListEvent, SearchBox, SearchEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBox,
    pub country_list: CountryListState,
    pub detail_view: DetailViewState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search_box: SearchBox::new(),
            country_list: CountryListState::new(),
            detail_view: DetailViewState::new(),
        }
    }

    /// Copy the props that gate input from core state.
    fn sync(&mut self, app: &App) {
        self.search_box.enabled = app.list.search_enabled();
        self.search_box.focused = app.list.search_focused();
        self.country_list.sync_len(app.list.visible().len());
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(service: Arc<CountryService>) -> std::io::Result<()> {
    let mut app = App::new(service);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let mut should_quit = dispatch(&mut app, &mut tui, Action::LoadCountries, &tx);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.sync(&app);
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event, &tx) {
                should_quit = true;
                break;
            }
        }

        // Results from background tasks
        while !should_quit && let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit = dispatch(&mut app, &mut tui, action, &tx);
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Route one terminal event to the component in front. Returns true to quit.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    tui.sync(app);

    let action = match (&app.screen, &event) {
        (_, TuiEvent::Resize) => return false,
        (_, TuiEvent::ForceQuit) => Some(Action::Quit),

        (Screen::List, TuiEvent::Escape) => Some(Action::Quit),
        (Screen::List, TuiEvent::InputChar('r')) if app.list.phase() == &ListPhase::Failed => {
            Some(Action::LoadCountries)
        }
        (
            Screen::List,
            TuiEvent::CursorUp
            | TuiEvent::CursorDown
            | TuiEvent::PageUp
            | TuiEvent::PageDown
            | TuiEvent::Submit,
        ) => match tui.country_list.handle_event(&event) {
            Some(ListEvent::Open(index)) => Some(Action::SelectCountry(index)),
            None => None,
        },
        (Screen::List, _) => match tui.search_box.handle_event(&event) {
            Some(SearchEvent::Changed(query)) => {
                tui.country_list.reset();
                Some(Action::SearchChanged(query))
            }
            None => None,
        },

        (Screen::Detail, _) => match tui.detail_view.handle_event(&event) {
            Some(DetailEvent::ToggleSave) => Some(Action::ToggleSave),
            Some(DetailEvent::Back) => Some(Action::Back),
            None => None,
        },
    };

    match action {
        Some(action) => dispatch(app, tui, action, tx),
        None => false,
    }
}

/// Run an action through `update()` and perform the resulting effect.
/// Returns true to quit.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    let before = app.screen;
    let effect = update(app, action);
    if before == Screen::List && app.screen == Screen::Detail {
        tui.detail_view.reset();
    }

    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::FetchCountries => {
            spawn_load_all(app.service.clone(), tx.clone());
            false
        }
        Effect::FetchDetails(name) => {
            spawn_load_details(app.service.clone(), name, tx.clone());
            false
        }
        Effect::ToggleSave => {
            let service = app.service.clone();
            let name = app
                .detail
                .details()
                .map(|d| d.common_name.clone())
                .unwrap_or_default();
            app.status_message = match app.detail.toggle_save(&service) {
                Ok(true) => format!("Saved {name}"),
                Ok(false) => format!("Removed {name} from saved"),
                Err(e) => {
                    warn!("Toggle save failed: {}", e);
                    format!("Error: {e}")
                }
            };
            false
        }
    }
}

fn spawn_load_all(service: Arc<CountryService>, tx: mpsc::Sender<Action>) {
    info!("Spawning country list load");
    tokio::spawn(async move {
        let result = service.load_all().await;
        if tx.send(Action::CountriesLoaded(result)).is_err() {
            warn!("Failed to send CountriesLoaded: receiver dropped");
        }
    });
}

fn spawn_load_details(service: Arc<CountryService>, name: String, tx: mpsc::Sender<Action>) {
    info!("Spawning details load for '{}'", name);
    tokio::spawn(async move {
        let result = service.load_details(&name).await;
        let saved = result
            .as_ref()
            .map(|loaded| service.is_saved(loaded.value.key()))
            .unwrap_or(false);
        if tx
            .send(Action::DetailsLoaded {
                name: name.clone(),
                result,
                saved,
            })
            .is_err()
        {
            warn!("Failed to send DetailsLoaded for '{}': receiver dropped", name);
        }
    });
}
