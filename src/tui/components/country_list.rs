//! # Country List Component
//!
//! Scrollable table of the countries matching the current search.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CountryListState` lives in `TuiState` (selection survives redraws)
//! - `CountryList` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::list::ListPhase;
use crate::core::model::Country;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Rows skipped by PageUp / PageDown.
const PAGE_SIZE: usize = 10;

/// Persistent selection state for the country list.
#[derive(Default)]
pub struct CountryListState {
    pub selected: usize,
    pub list_state: ListState,
    /// Number of rows currently visible, refreshed by `sync_len`.
    len: usize,
}

/// Events emitted by the country list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// Open the visible country at this index.
    Open(usize),
}

impl CountryListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp the selection after the visible rows changed (load, filter).
    pub fn sync_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Back to the first row, e.g. after the query changed.
    pub fn reset(&mut self) {
        self.selected = 0;
        *self.list_state.offset_mut() = 0;
        self.sync_len(self.len);
    }

    fn move_by(&mut self, delta: isize) {
        if self.len == 0 {
            return;
        }
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, self.len as isize - 1) as usize;
        self.list_state.select(Some(self.selected));
    }
}

impl EventHandler for CountryListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => self.move_by(-1),
            TuiEvent::CursorDown => self.move_by(1),
            TuiEvent::PageUp => self.move_by(-(PAGE_SIZE as isize)),
            TuiEvent::PageDown => self.move_by(PAGE_SIZE as isize),
            TuiEvent::Submit if self.len > 0 => return Some(ListEvent::Open(self.selected)),
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the country list.
pub struct CountryList<'a> {
    pub state: &'a mut CountryListState,
    pub countries: &'a [Country],
    pub phase: &'a ListPhase,
    pub error: Option<&'a str>,
    pub filtered: bool,
    pub spinner: &'a str,
}

impl Component for CountryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync_len(self.countries.len());

        let title = format!(" Countries ({}) ", self.countries.len());
        let help = match self.phase {
            ListPhase::Failed => " r Retry  Esc Quit ",
            _ => " ↑↓ Move  Enter Open  Esc Quit ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_bottom(Line::from(help).centered())
            .padding(Padding::horizontal(1));

        if self.countries.is_empty() {
            let (text, color) = match self.phase {
                ListPhase::Idle => (String::new(), Color::DarkGray),
                ListPhase::Loading => (format!("{} Loading countries...", self.spinner), Color::Yellow),
                ListPhase::Failed => (
                    format!(
                        "Failed to load countries: {}\nPress r to retry.",
                        self.error.unwrap_or("unknown error")
                    ),
                    Color::Red,
                ),
                ListPhase::Loaded if self.filtered => ("No countries match.".to_string(), Color::DarkGray),
                ListPhase::Loaded => ("No countries.".to_string(), Color::DarkGray),
            };
            let empty = Paragraph::new(text)
                .style(Style::default().fg(color))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Layout: "<name padded>  <capital>"
        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let name_width = (inner_width * 3 / 5).max(1);
        let capital_width = inner_width.saturating_sub(name_width + 2);

        let items: Vec<ListItem> = self
            .countries
            .iter()
            .enumerate()
            .map(|(i, country)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let name = pad_to_width(&truncate_to_width(&country.name, name_width), name_width);
                let capital = truncate_to_width(&country.capital, capital_width);
                ListItem::new(Line::from(vec![
                    Span::styled(name, style),
                    Span::styled("  ", style),
                    Span::styled(capital, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate to at most `max_width` display columns, adding "..." if cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(pad))
}
