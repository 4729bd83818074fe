//! # TextField
//!
//! Editable text buffer with a byte-offset cursor that always sits on a char
//! boundary. Shared by the composer and the role prompt editor.
//!
//! Wrapping is character-based (not word-based) so the cursor position can be
//! derived from the same line breaks that get rendered.

use unicode_width::UnicodeWidthChar;

use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    buffer: String,
    /// Byte offset into `buffer`.
    cursor: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field holding `text` with the cursor at the end.
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    /// Takes the buffer, leaving the field empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Applies an editing event. Returns true if the text or cursor changed.
    pub fn apply(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                true
            }
            TuiEvent::Paste(text) => {
                // Normalize CRLF from pasted content
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                !text.is_empty()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                true
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return false;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                true
            }
            TuiEvent::CursorLeft => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                true
            }
            TuiEvent::CursorRight => {
                if self.cursor >= self.buffer.len() {
                    return false;
                }
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                true
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                let moved = self.cursor != line_start;
                self.cursor = line_start;
                moved
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                let moved = self.cursor != line_end;
                self.cursor = line_end;
                moved
            }
            _ => false,
        }
    }

    /// Lines as rendered at `width` columns.
    pub fn wrapped_lines(&self, width: u16) -> Vec<String> {
        wrap_chars(&self.buffer, width)
    }

    /// Cursor (row, column) within the wrapped lines at `width` columns.
    pub fn cursor_position(&self, width: u16) -> (u16, u16) {
        let width = width.max(1);
        let mut row: u16 = 0;
        let mut col: u16 = 0;
        for c in self.buffer[..self.cursor].chars() {
            if c == '\n' {
                row = row.saturating_add(1);
                col = 0;
                continue;
            }
            let w = char_width(c);
            if col.saturating_add(w) > width {
                row = row.saturating_add(1);
                col = 0;
            }
            col = col.saturating_add(w);
        }
        // A cursor parked past the last column drops to the next row
        if col >= width {
            row = row.saturating_add(1);
            col = 0;
        }
        (row, col)
    }
}

fn char_width(c: char) -> u16 {
    u16::try_from(c.width().unwrap_or(0)).unwrap_or(u16::MAX)
}

/// Hard-wraps `text` at `width` display columns, honouring explicit newlines.
/// Always returns at least one (possibly empty) line.
pub fn wrap_chars(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1);
    let mut lines = vec![String::new()];
    let mut col: u16 = 0;
    for c in text.chars() {
        if c == '\n' {
            lines.push(String::new());
            col = 0;
            continue;
        }
        let w = char_width(c);
        if col.saturating_add(w) > width {
            lines.push(String::new());
            col = 0;
        }
        if let Some(line) = lines.last_mut() {
            line.push(c);
        }
        col = col.saturating_add(w);
    }
    lines
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(s.len())
}
