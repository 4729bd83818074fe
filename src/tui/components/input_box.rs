//! # InputBox Component
//!
//! The composer. Captures the message being typed and shows whether it can be
//! sent.
//!
//! ## State Management
//!
//! The text buffer is internal state (`TextField`). Everything shown in the
//! borders is a prop synced from `App` each frame:
//! - `send_hint`: None when sending is allowed, otherwise why it isn't
//! - `search_next`: per-message web search is armed
//! - `focused`: draw the cursor and a bright border

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::TextField;
use crate::tui::event::TuiEvent;

/// Rows consumed by the top and bottom border.
const VERTICAL_OVERHEAD: u16 = 2;
/// Columns consumed by the left and right border.
const HORIZONTAL_OVERHEAD: u16 = 2;
/// The box grows with its content up to this many text rows, then scrolls.
pub const MAX_VISIBLE_LINES: u16 = 6;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Enter pressed on non-blank text. The buffer is left intact; the
    /// parent takes it once the send is accepted.
    SubmitRequested,
    ContentChanged,
}

pub struct InputBox {
    pub field: TextField,
    /// Why sending is disabled (Prop)
    pub send_hint: Option<&'static str>,
    /// Per-message web search armed (Prop)
    pub search_next: bool,
    /// Has keyboard focus (Prop)
    pub focused: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            field: TextField::new(),
            send_hint: None,
            search_next: false,
            focused: true,
        }
    }

    pub fn text(&self) -> &str {
        self.field.text()
    }

    /// Takes the draft for sending and clears the box.
    pub fn take(&mut self) -> String {
        self.field.take()
    }

    fn content_width(area_width: u16) -> u16 {
        area_width.saturating_sub(HORIZONTAL_OVERHEAD).max(1)
    }

    /// Text rows needed at `area_width`, including the row the cursor sits on.
    fn content_rows(&self, area_width: u16) -> u16 {
        let width = Self::content_width(area_width);
        let lines = u16::try_from(self.field.wrapped_lines(width).len()).unwrap_or(u16::MAX);
        let (cursor_row, _) = self.field.cursor_position(width);
        lines.max(cursor_row.saturating_add(1))
    }

    /// Height for the current content, clamped to
    /// `[1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD]`.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        self.content_rows(area_width).clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn title(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(" Message ")];
        if self.search_next {
            spans.push(Span::styled(
                "[web search: this message] ",
                Style::default().fg(Color::Magenta),
            ));
        }
        Line::from(spans)
    }

    fn footer(&self) -> Line<'static> {
        let line = match self.send_hint {
            None => Line::from(Span::styled(
                " Enter send ",
                Style::default().fg(Color::Green),
            )),
            Some(hint) => Line::from(Span::styled(
                format!(" Send disabled: {hint} "),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
        };
        line.right_aligned()
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = Self::content_width(area.width);
        let lines = self.field.wrapped_lines(width);
        let (cursor_row, cursor_col) = self.field.cursor_position(width);

        // Keep the cursor row on screen once content outgrows the box
        let visible_rows = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1);
        let first_row = cursor_row.saturating_add(1).saturating_sub(visible_rows);

        let visible: Vec<Line> = lines
            .into_iter()
            .skip(first_row as usize)
            .take(visible_rows as usize)
            .map(Line::from)
            .collect();

        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title())
            .title_bottom(self.footer());

        frame.render_widget(Paragraph::new(visible).block(block), area);

        if self.focused {
            frame.set_cursor_position((
                area.x + 1 + cursor_col,
                area.y + 1 + (cursor_row - first_row).min(visible_rows - 1),
            ));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Submit => (!self.field.is_blank()).then_some(InputEvent::SubmitRequested),
            other => self
                .field
                .apply(other)
                .then_some(InputEvent::ContentChanged),
        }
    }
}
