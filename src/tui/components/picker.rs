//! # Picker Component
//!
//! Centered overlay for choosing a provider or one of the current provider's
//! models. Opened from the sidebar with Enter.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PickerState` lives in `TuiState` while the overlay is open
//! - `Picker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, ListState, Padding};

use crate::core::agent::Provider;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerChoice {
    Provider(Provider),
    Model(String),
}

/// Events emitted by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    Chosen(PickerChoice),
    Dismiss,
}

/// Persistent state for the picker overlay.
pub struct PickerState {
    pub title: String,
    pub options: Vec<PickerChoice>,
    /// Index of the currently active option, marked with `*`
    pub active: Option<usize>,
    pub selected: usize,
    pub list_state: ListState,
}

impl PickerState {
    fn new(title: String, options: Vec<PickerChoice>, active: Option<usize>) -> Self {
        let selected = active.unwrap_or(0);
        let mut list_state = ListState::default();
        if !options.is_empty() {
            list_state.select(Some(selected));
        }
        Self {
            title,
            options,
            active,
            selected,
            list_state,
        }
    }

    /// All providers, with the current one pre-selected.
    pub fn providers(current: Option<Provider>) -> Self {
        let options = Provider::ALL.iter().copied().map(PickerChoice::Provider).collect();
        let active = current.and_then(|c| Provider::ALL.iter().position(|p| *p == c));
        Self::new(" Provider ".to_string(), options, active)
    }

    /// The models offered by `provider`.
    pub fn models(provider: Provider, current: Option<&str>) -> Self {
        let catalogue = provider.models();
        let options = catalogue
            .iter()
            .map(|m| PickerChoice::Model(m.to_string()))
            .collect();
        let active = current.and_then(|c| catalogue.iter().position(|m| *m == c));
        Self::new(format!(" {} models ", provider.label()), options, active)
    }

    fn label(choice: &PickerChoice) -> &str {
        match choice {
            PickerChoice::Provider(p) => p.label(),
            PickerChoice::Model(m) => m.as_str(),
        }
    }
}

impl EventHandler for PickerState {
    type Event = PickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(PickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.options.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.options.is_empty() {
                    self.selected = (self.selected + 1).min(self.options.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self
                .options
                .get(self.selected)
                .map(|choice| PickerEvent::Chosen(choice.clone())),
            _ => None,
        }
    }
}

/// Transient render wrapper for the picker overlay.
pub struct Picker<'a> {
    state: &'a mut PickerState,
}

impl<'a> Picker<'a> {
    pub fn new(state: &'a mut PickerState) -> Self {
        Self { state }
    }
}

impl<'a> Component for Picker<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 50, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(self.state.title.clone())
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        let inner_width = overlay.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .state
            .options
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let marker = if self.state.active == Some(i) { " *" } else { "" };
                let name = truncate_str(
                    PickerState::label(choice),
                    inner_width.saturating_sub(marker.len()),
                );
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if self.state.active == Some(i) {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(name, style),
                    Span::styled(marker, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` chars, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    let count = s.chars().count();
    if count <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
