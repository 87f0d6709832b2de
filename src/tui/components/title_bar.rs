//! # TitleBar Component
//!
//! Top status bar: app name, the current status message and a spinner while
//! anything is loading.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state, so it is rebuilt every frame:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.status_message.clone(), app.is_loading(), "⠋");
//! title_bar.render(frame, title_area);
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct TitleBar<'a> {
    /// Status message (e.g. "250 countries", "Error: request timed out")
    pub status_message: String,
    /// Whether a background load is running
    pub loading: bool,
    /// Current spinner glyph
    pub spinner: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(status_message: String, loading: bool, spinner: &'a str) -> Self {
        Self {
            status_message,
            loading,
            spinner,
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "atlas",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            let style = if self.status_message.starts_with("Error") {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(self.status_message.clone(), style));
        }
        if self.loading {
            spans.push(Span::raw(format!(" {}", self.spinner)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
