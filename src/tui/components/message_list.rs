//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Display the messages in order
//! - Keep the view pinned to the newest message unless the user scrolls away
//! - Keyboard selection and the per-message actions (copy, delete, regenerate)
//! - Hit testing for mouse clicks
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the conversation (props).
//! Heights and prefix sums are recomputed during render and kept on the state
//! for hit testing and scroll-to-selection between frames.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Conversation;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
/// Rows reserved under the last message for the typing indicator.
const TYPING_ROWS: u16 = 1;

/// Actions requested on the selected message, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageListEvent {
    Copy(usize),
    Delete(usize),
    Regenerate(usize),
    /// Hand focus back to the composer.
    Leave,
}

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    pub selected_index: Option<usize>,
    /// Number of messages in the conversation (Prop, synced each frame)
    pub item_count: usize,
    /// Rendered height of each message from the last frame
    pub heights: Vec<u16>,
    /// Running sum of `heights` (prefix_heights[i] = bottom edge of message i)
    pub prefix_heights: Vec<u16>,
    pub viewport_height: u16,
    /// Screen area the list occupied in the last frame
    pub area: Rect,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            selected_index: None,
            item_count: 0,
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            viewport_height: 0,
            area: Rect::default(),
        }
    }

    /// Updates the message count and keeps the selection in range.
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        self.selected_index = match self.selected_index {
            Some(_) if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => None,
        };
    }

    fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    fn rebuild_prefix_heights(&mut self) {
        let mut acc: u16 = 0;
        self.prefix_heights = self
            .heights
            .iter()
            .map(|h| {
                acc = acc.saturating_add(*h);
                acc
            })
            .collect();
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        if self.scroll_state.offset().y >= max_y {
            self.stick_to_bottom = true;
        }
    }

    /// Scroll so the selected message is fully visible (top edge if taller
    /// than the viewport).
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        let Some(&item_bottom) = self.prefix_heights.get(idx) else {
            return;
        };
        let item_top = item_bottom.saturating_sub(self.heights[idx]);
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
            self.stick_to_bottom = false;
        } else if item_bottom > offset_y.saturating_add(self.viewport_height) {
            let new_y = item_bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
            let max_y = self.total_height().saturating_sub(self.viewport_height);
            self.stick_to_bottom = new_y >= max_y;
        }
    }

    /// Which message (if any) is drawn at screen position (column, row).
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        if !self.area.contains(Position { x: column, y: row }) {
            return None;
        }
        let content_y = (row - self.area.y).saturating_add(self.scroll_state.offset().y);
        self.prefix_heights
            .iter()
            .position(|&bottom| content_y < bottom)
    }

    fn select_previous(&mut self) {
        if self.item_count == 0 {
            return;
        }
        let idx = self
            .selected_index
            .map(|i| i.saturating_sub(1))
            .unwrap_or(self.item_count - 1);
        self.selected_index = Some(idx);
        self.scroll_to_selected();
    }

    fn select_next(&mut self) {
        if let Some(idx) = self.selected_index
            && idx + 1 < self.item_count
        {
            self.selected_index = Some(idx + 1);
            self.scroll_to_selected();
        }
    }
}

impl EventHandler for MessageListState {
    type Event = MessageListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::CursorEnd => {
                self.stick_to_bottom = true;
                None
            }
            TuiEvent::CursorUp => {
                self.select_previous();
                None
            }
            TuiEvent::CursorDown => {
                self.select_next();
                None
            }
            TuiEvent::InputChar('c') => self.selected_index.map(MessageListEvent::Copy),
            TuiEvent::InputChar('d') | TuiEvent::Delete => {
                self.selected_index.map(MessageListEvent::Delete)
            }
            TuiEvent::InputChar('r') => self.selected_index.map(MessageListEvent::Regenerate),
            TuiEvent::Escape => Some(MessageListEvent::Leave),
            _ => None,
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub conversation: &'a Conversation,
    pub is_loading: bool,
    pub spinner_frame: usize,
    /// Show the selection highlight (list has focus)
    pub focused: bool,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        conversation: &'a Conversation,
        is_loading: bool,
        spinner_frame: usize,
        focused: bool,
    ) -> Self {
        Self {
            state,
            conversation,
            is_loading,
            spinner_frame,
            focused,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Measure
        self.state.area = area;
        self.state.viewport_height = area.height;
        self.state.set_item_count(self.conversation.len());
        self.state.heights = self
            .conversation
            .iter()
            .map(|m| Message::calculate_height(m, content_width))
            .collect();
        self.state.rebuild_prefix_heights();

        let total_height = self.state.total_height();
        let typing_rows = if self.is_loading { TYPING_ROWS } else { 0 };
        let canvas_height = total_height.saturating_add(typing_rows);

        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        // 2. Draw into the scroll view
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (i, message) in self.conversation.iter().enumerate() {
            let height = self.state.heights[i];
            let is_selected = self.focused && self.state.selected_index == Some(i);
            scroll_view.render_widget(
                Message::new(message, is_selected),
                Rect::new(0, y_offset, content_width, height),
            );
            y_offset = y_offset.saturating_add(height);
        }

        if self.is_loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            let typing = Paragraph::new(format!(" {spinner} aurora is typing..."))
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            scroll_view.render_widget(typing, Rect::new(0, y_offset, content_width, TYPING_ROWS));
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn conversation(n: usize) -> Conversation {
        let mut conv = Conversation::new();
        for i in 0..n {
            let role = if i % 2 == 0 { Role::User } else { Role::Agent };
            conv.push(role, format!("message {i}"));
        }
        conv
    }

    fn render(state: &mut MessageListState, conv: &Conversation, is_loading: bool) -> String {
        let backend = TestBackend::new(50, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                MessageList::new(state, conv, is_loading, 0, true).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_measures_every_message() {
        let conv = conversation(3);
        let mut state = MessageListState::new();
        render(&mut state, &conv, false);
        // One line of text + two borders each
        assert_eq!(state.heights, vec![3, 3, 3]);
        assert_eq!(state.prefix_heights, vec![3, 6, 9]);
    }

    #[test]
    fn test_render_shows_typing_indicator() {
        let conv = conversation(1);
        let mut state = MessageListState::new();
        let text = render(&mut state, &conv, true);
        assert!(text.contains("aurora is typing"));
        let text = render(&mut state, &conv, false);
        assert!(!text.contains("aurora is typing"));
    }

    #[test]
    fn test_selection_moves_within_bounds() {
        let mut state = MessageListState::new();
        state.set_item_count(3);

        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected_index, Some(2));
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected_index, Some(2));
        state.handle_event(&TuiEvent::CursorUp);
        state.handle_event(&TuiEvent::CursorUp);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected_index, Some(0));
    }

    #[test]
    fn test_actions_need_selection() {
        let mut state = MessageListState::new();
        state.set_item_count(2);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d')), None);

        state.selected_index = Some(1);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d')),
            Some(MessageListEvent::Delete(1))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('c')),
            Some(MessageListEvent::Copy(1))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('r')),
            Some(MessageListEvent::Regenerate(1))
        );
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(MessageListEvent::Leave));
    }

    #[test]
    fn test_shrinking_count_clamps_selection() {
        let mut state = MessageListState::new();
        state.set_item_count(3);
        state.selected_index = Some(2);
        state.set_item_count(2);
        assert_eq!(state.selected_index, Some(1));
        state.set_item_count(0);
        assert_eq!(state.selected_index, None);
    }

    #[test]
    fn test_hit_test_maps_rows_to_messages() {
        let conv = conversation(3);
        let mut state = MessageListState::new();
        render(&mut state, &conv, false);

        assert_eq!(state.hit_test(5, 0), Some(0));
        assert_eq!(state.hit_test(5, 4), Some(1));
        assert_eq!(state.hit_test(5, 8), Some(2));
        assert_eq!(state.hit_test(5, 10), None);
        assert_eq!(state.hit_test(60, 0), None);
    }

    #[test]
    fn test_tall_message_heights_saturate() {
        let mut state = MessageListState::new();
        state.heights = vec![u16::MAX, 3];
        state.rebuild_prefix_heights();
        assert_eq!(state.prefix_heights, vec![u16::MAX, u16::MAX]);

        state.set_item_count(2);
        state.viewport_height = 10;
        state.area = Rect::new(0, 0, 50, 10);
        state.scroll_state.set_offset(Position { x: 0, y: u16::MAX - 5 });
        assert_eq!(state.hit_test(5, 9), None);

        state.selected_index = Some(1);
        state.scroll_to_selected();
        assert_eq!(state.scroll_state.offset().y, u16::MAX - 5);
    }

    #[test]
    fn test_scroll_up_unpins() {
        let mut state = MessageListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        state.handle_event(&TuiEvent::CursorEnd);
        assert!(state.stick_to_bottom);
    }
}
