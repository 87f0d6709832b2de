//! # SearchBox Component
//!
//! Single-line query input above the country list.
//!
//! ## Responsibilities
//!
//! - Capture text input and editing keys (backspace, delete, cursor movement, paste)
//! - Report every change of the query so the list can be re-filtered
//! - Refuse input while the list controller has search locked
//!
//! ## State Management
//!
//! The buffer is internal state. `enabled` and `focused` are props copied
//! from the `ListController` each frame. Cursor position and horizontal
//! scroll live in `CursorState`.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{BORDER_OFFSET, CursorState, next_char_boundary, prev_char_boundary, visible_slice};

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The query text changed; carries the full new query.
    Changed(String),
}

pub struct SearchBox {
    /// Query text (Internal State)
    pub buffer: String,
    /// Whether input is accepted (Prop)
    pub enabled: bool,
    /// Whether the terminal cursor belongs to this box (Prop)
    pub focused: bool,
    cursor: CursorState,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            enabled: false,
            focused: false,
            cursor: CursorState::new(),
        }
    }

    fn changed(&self) -> Option<SearchEvent> {
        Some(SearchEvent::Changed(self.buffer.clone()))
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2 * BORDER_OFFSET);
        self.cursor.update_scroll(&self.buffer, inner_width);

        let (title, style) = if self.enabled {
            (" Search ", Style::default().fg(Color::Green))
        } else {
            (" Search (locked) ", Style::default().fg(Color::DarkGray))
        };

        let text = visible_slice(&self.buffer, self.cursor.scroll_cols, inner_width as usize);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title);

        frame.render_widget(Paragraph::new(text).block(block).style(style), area);

        if self.enabled && self.focused {
            let col = self.cursor.column(&self.buffer) - self.cursor.scroll_cols;
            let x = area.x + BORDER_OFFSET + (col as u16).min(inner_width.saturating_sub(1));
            frame.set_cursor_position((x, area.y + BORDER_OFFSET));
        }
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if !self.enabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                // Single line: newlines in pasted text become spaces
                let text = text.replace(['\r', '\n'], " ");
                if text.is_empty() {
                    return None;
                }
                self.buffer.insert_str(self.cursor.pos, &text);
                self.cursor.pos += text.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                if self.cursor.pos > 0 {
                    self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                }
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor.pos < self.buffer.len() {
                    self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor.pos = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor.pos = self.buffer.len();
                None
            }
            _ => None,
        }
    }
}
