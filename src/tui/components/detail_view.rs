//! # Detail View Component
//!
//! Full-screen view of one country: a header with the save toggle and a
//! scrollable body with one field per row.
//!
//! Persistent state (`DetailViewState`) keeps the scroll position; the
//! `DetailView` wrapper is rebuilt each frame from the detail controller.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::UnicodeWidthStr;

use crate::core::detail::SaveIcon;
use crate::core::service::Origin;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Default)]
pub struct DetailViewState {
    pub scroll_state: ScrollViewState,
}

/// Events emitted by the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEvent {
    ToggleSave,
    Back,
}

impl DetailViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll to the top, e.g. when a different country is opened.
    pub fn reset(&mut self) {
        self.scroll_state.set_offset(Position::ORIGIN);
    }
}

impl EventHandler for DetailViewState {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar('s') => return Some(DetailEvent::ToggleSave),
            TuiEvent::Escape | TuiEvent::Backspace => return Some(DetailEvent::Back),
            TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::CursorLeft => self.scroll_state.scroll_left(),
            TuiEvent::CursorRight => self.scroll_state.scroll_right(),
            TuiEvent::PageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::PageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::CursorHome => self.scroll_state.scroll_to_top(),
            TuiEvent::CursorEnd => self.scroll_state.scroll_to_bottom(),
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the detail view.
pub struct DetailView<'a> {
    pub state: &'a mut DetailViewState,
    pub lines: Vec<String>,
    pub save_icon: SaveIcon,
    pub origin: Option<Origin>,
}

fn origin_label(origin: Option<Origin>) -> &'static str {
    match origin {
        Some(Origin::Saved) => "saved copy",
        Some(Origin::Cache) => "cached copy",
        Some(Origin::Remote) => "live",
        None => "",
    }
}

impl Component for DetailView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Country ")
            .title_bottom(Line::from(" s Save  ↑↓ Scroll  Esc Back ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

        let icon_style = match self.save_icon {
            SaveIcon::Saved => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            SaveIcon::NotSaved => Style::default().fg(Color::Gray),
        };
        let header = Line::from(vec![
            Span::styled(
                format!("{} {}", self.save_icon.symbol(), self.save_icon.label()),
                icon_style,
            ),
            Span::styled(
                format!("  {}", origin_label(self.origin)),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), header_area);

        // Rows are never wrapped; wide rows (map links) scroll horizontally.
        let content_width = self
            .lines
            .iter()
            .map(|l| l.width() as u16)
            .max()
            .unwrap_or(0)
            .max(body_area.width.saturating_sub(1));
        let content_height = self.lines.len() as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Automatic);

        for (i, row) in self.lines.iter().enumerate() {
            let style = if i == 0 {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            scroll_view.render_widget(
                Paragraph::new(row.as_str()).style(style),
                Rect::new(0, i as u16, content_width, 1),
            );
        }

        frame.render_stateful_widget(scroll_view, body_area, &mut self.state.scroll_state);
    }
}
