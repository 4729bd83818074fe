//! # TitleBar Component
//!
//! Top status line: application name, the active provider/model, a spinner
//! while a reply is pending, and the transient status message.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state.
//!
//! ## Conditional Formatting
//!
//! 1. **Loading**: `"Aurora Agent (Groq · gemma2-9b-it) ⠋ | Waiting for Groq..."`
//! 2. **Status message**: `"Aurora Agent (Groq · gemma2-9b-it) | Model: gemma2-9b-it"`
//! 3. **Default**: `"Aurora Agent (Groq · gemma2-9b-it)"`
//!
//! Without a complete selection the parenthesised part reads `(not configured)`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct TitleBar {
    /// e.g. "Groq · gemma2-9b-it", or None when provider/model are incomplete
    pub target: Option<String>,
    pub status_message: String,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(
        target: Option<String>,
        status_message: String,
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            target,
            status_message,
            is_loading,
            spinner_frame,
        }
    }

    pub fn text(&self) -> String {
        let target = self.target.as_deref().unwrap_or("not configured");
        let mut text = format!("Aurora Agent ({target})");
        if self.is_loading {
            text.push(' ');
            text.push(SPINNER[self.spinner_frame % SPINNER.len()]);
        }
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
