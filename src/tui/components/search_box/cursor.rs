//! Cursor tracking for the single-line SearchBox.
//!
//! `CursorState` owns the cursor byte offset and the horizontal scroll offset
//! (in display columns). The text itself is owned by `SearchBox` and passed in.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Border (1) on each side of the bordered block
pub(super) const BORDER_OFFSET: u16 = 1;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible display column when the query is wider than the box
    pub scroll_cols: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_cols: 0,
        }
    }

    /// Display column of the cursor within the whole buffer.
    pub fn column(&self, buffer: &str) -> usize {
        buffer[..self.pos].width()
    }

    /// Keeps the cursor inside a viewport `inner_width` columns wide.
    pub fn update_scroll(&mut self, buffer: &str, inner_width: u16) {
        let width = inner_width.max(1) as usize;
        let col = self.column(buffer);
        if col < self.scroll_cols {
            self.scroll_cols = col;
        } else if col >= self.scroll_cols + width {
            self.scroll_cols = col + 1 - width;
        }
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// The part of `text` visible when the first `skip` columns are scrolled off,
/// clipped to `width` columns.
pub(super) fn visible_slice(text: &str, skip: usize, width: usize) -> String {
    let mut col = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if col >= skip && col + w <= skip + width {
            out.push(c);
        }
        col += w;
        if col >= skip + width {
            break;
        }
    }
    out
}
