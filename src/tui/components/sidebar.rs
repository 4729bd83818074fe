//! # Sidebar Component
//!
//! The agent configuration form.
//!
//! ```text
//! ╭ Agent ─────────────────────╮
//! │ Role prompt                │
//! │ You are a helpful…         │
//! │                            │
//! │ Provider    ‹ Groq ›       │
//! │ Model       llama-3.3-70b… │
//! │ Web search  [x]            │
//! │ ▸ Advanced (Ctrl+G)        │
//! ╰────────────────────────────╯
//! ```
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState` (selected field, prompt editor)
//! - `Sidebar` is created each frame with borrowed state and the agent config
//!
//! Edits are reported upward as core `Action`s. The sidebar never mutates
//! `AgentConfig` itself.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::action::Action;
use crate::core::agent::{AgentConfig, Step};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::TextField;
use crate::tui::event::TuiEvent;

/// Preferred sidebar width in columns.
pub const SIDEBAR_WIDTH: u16 = 36;
/// Text rows given to the role prompt.
const PROMPT_ROWS: u16 = 5;
/// Width of the field label column.
const LABEL_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarField {
    RolePrompt,
    Provider,
    Model,
    WebSearch,
    Temperature,
    MaxTokens,
}

impl SidebarField {
    const BASIC: [SidebarField; 4] = [
        SidebarField::RolePrompt,
        SidebarField::Provider,
        SidebarField::Model,
        SidebarField::WebSearch,
    ];
    const ALL: [SidebarField; 6] = [
        SidebarField::RolePrompt,
        SidebarField::Provider,
        SidebarField::Model,
        SidebarField::WebSearch,
        SidebarField::Temperature,
        SidebarField::MaxTokens,
    ];

    fn visible(advanced: bool) -> &'static [SidebarField] {
        if advanced { &Self::ALL } else { &Self::BASIC }
    }

    fn is_advanced(self) -> bool {
        matches!(self, SidebarField::Temperature | SidebarField::MaxTokens)
    }
}

/// Which overlay the sidebar wants opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerRequest {
    Provider,
    Model,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SidebarEvent {
    Action(Action),
    OpenPicker(PickerRequest),
    /// Step to the neighbouring provider.
    CycleProvider(Step),
    /// Hand focus back to the composer.
    Leave,
}

pub struct SidebarState {
    pub selected: SidebarField,
    pub prompt: TextField,
    /// Keystrokes go to the role prompt editor
    pub editing_prompt: bool,
    /// Advanced fields shown (Prop, synced from `App`)
    advanced_open: bool,
}

impl SidebarState {
    pub fn new(role_prompt: &str, advanced_open: bool) -> Self {
        Self {
            selected: SidebarField::Provider,
            prompt: TextField::with_text(role_prompt),
            editing_prompt: false,
            advanced_open,
        }
    }

    /// Syncs the advanced-panel prop, moving the selection off hidden fields.
    pub fn set_advanced(&mut self, open: bool) {
        self.advanced_open = open;
        if !open && self.selected.is_advanced() {
            self.selected = SidebarField::WebSearch;
        }
    }

    fn move_selection(&mut self, forward: bool) {
        let fields = SidebarField::visible(self.advanced_open);
        let idx = fields.iter().position(|f| *f == self.selected).unwrap_or(0);
        let next = if forward {
            (idx + 1).min(fields.len() - 1)
        } else {
            idx.saturating_sub(1)
        };
        self.selected = fields[next];
    }

    fn handle_prompt_edit(&mut self, event: &TuiEvent) -> Option<SidebarEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Submit => {
                self.editing_prompt = false;
                None
            }
            other => self
                .prompt
                .apply(other)
                .then(|| SidebarEvent::Action(Action::SetRolePrompt(self.prompt.text().to_string()))),
        }
    }
}

impl EventHandler for SidebarState {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.editing_prompt {
            return self.handle_prompt_edit(event);
        }

        let step = match event {
            TuiEvent::CursorRight => Some(Step::Up),
            TuiEvent::CursorLeft => Some(Step::Down),
            _ => None,
        };

        match (event, self.selected) {
            (TuiEvent::Escape, _) => Some(SidebarEvent::Leave),
            (TuiEvent::CursorUp, _) => {
                self.move_selection(false);
                None
            }
            (TuiEvent::CursorDown, _) => {
                self.move_selection(true);
                None
            }
            (TuiEvent::Submit, SidebarField::RolePrompt) => {
                self.editing_prompt = true;
                None
            }
            (TuiEvent::Submit, SidebarField::Provider) => {
                Some(SidebarEvent::OpenPicker(PickerRequest::Provider))
            }
            (TuiEvent::Submit, SidebarField::Model) => {
                Some(SidebarEvent::OpenPicker(PickerRequest::Model))
            }
            (TuiEvent::Submit | TuiEvent::InputChar(' '), SidebarField::WebSearch) => {
                Some(SidebarEvent::Action(Action::ToggleWebSearch))
            }
            (TuiEvent::CursorLeft | TuiEvent::CursorRight, SidebarField::Provider) => {
                step.map(SidebarEvent::CycleProvider)
            }
            (TuiEvent::CursorLeft | TuiEvent::CursorRight, SidebarField::Temperature) => {
                step.map(|s| SidebarEvent::Action(Action::StepTemperature(s)))
            }
            (TuiEvent::CursorLeft | TuiEvent::CursorRight, SidebarField::MaxTokens) => {
                step.map(|s| SidebarEvent::Action(Action::StepMaxTokens(s)))
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the sidebar.
pub struct Sidebar<'a> {
    pub state: &'a SidebarState,
    pub config: &'a AgentConfig,
    pub focused: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a SidebarState, config: &'a AgentConfig, focused: bool) -> Self {
        Self {
            state,
            config,
            focused,
        }
    }

    fn field_style(&self, field: SidebarField) -> Style {
        if self.focused && self.state.selected == field {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    fn row(&self, field: SidebarField, label: &str, value: Span<'a>) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), self.field_style(field)),
            Span::raw(" "),
            value,
        ])
    }

    fn placeholder(text: &'static str) -> Span<'static> {
        Span::styled(
            text,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    }

    fn settings_lines(&self) -> Vec<Line<'a>> {
        let provider = match self.config.provider() {
            Some(p) => Span::styled(format!("‹ {} ›", p.label()), Style::default().fg(Color::Yellow)),
            None => Self::placeholder("select…"),
        };
        let model = match self.config.model() {
            Some(m) => Span::styled(m.to_string(), Style::default().fg(Color::White)),
            None if self.config.provider().is_none() => Self::placeholder("pick a provider"),
            None => Self::placeholder("select…"),
        };
        let search = if self.config.web_search { "[x]" } else { "[ ]" };

        let mut lines = vec![
            self.row(SidebarField::Provider, "Provider", provider),
            self.row(SidebarField::Model, "Model", model),
            self.row(SidebarField::WebSearch, "Web search", Span::raw(search)),
            Line::default(),
        ];

        if self.state.advanced_open {
            lines.push(Line::from(Span::styled(
                "▾ Advanced (Ctrl+G)",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(self.row(
                SidebarField::Temperature,
                "Temperature",
                Span::raw(format!("‹ {:.1} ›", self.config.temperature)),
            ));
            lines.push(self.row(
                SidebarField::MaxTokens,
                "Max tokens",
                Span::raw(format!("‹ {} ›", self.config.max_tokens)),
            ));
        } else {
            lines.push(Line::from(Span::styled(
                "▸ Advanced (Ctrl+G)",
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines
    }
}

impl<'a> Component for Sidebar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(" Agent ")
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [label_area, prompt_area, _, settings_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(PROMPT_ROWS),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        let label = if self.state.editing_prompt {
            "Role prompt (Enter to finish)"
        } else {
            "Role prompt"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(label, self.field_style(SidebarField::RolePrompt))),
            label_area,
        );

        // Prompt text, scrolled to keep the cursor visible while editing
        let width = prompt_area.width.max(1);
        let lines = self.state.prompt.wrapped_lines(width);
        let (cursor_row, cursor_col) = self.state.prompt.cursor_position(width);
        let first_row = if self.state.editing_prompt {
            cursor_row.saturating_add(1).saturating_sub(PROMPT_ROWS)
        } else {
            0
        };
        let prompt_style = if self.state.editing_prompt {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        let visible: Vec<Line> = lines
            .into_iter()
            .skip(first_row as usize)
            .take(PROMPT_ROWS as usize)
            .map(Line::from)
            .collect();
        frame.render_widget(Paragraph::new(visible).style(prompt_style), prompt_area);

        if self.focused && self.state.editing_prompt {
            frame.set_cursor_position((
                prompt_area.x + cursor_col,
                prompt_area.y + (cursor_row - first_row).min(PROMPT_ROWS - 1),
            ));
        }

        frame.render_widget(Paragraph::new(self.settings_lines()), settings_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::agent::Provider;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(state: &SidebarState, config: &AgentConfig) -> String {
        let backend = TestBackend::new(SIDEBAR_WIDTH, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                Sidebar::new(state, config, true).render(f, f.area());
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
    fn test_navigation_skips_hidden_advanced_fields() {
        let mut state = SidebarState::new("", false);
        state.selected = SidebarField::WebSearch;
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, SidebarField::WebSearch);

        state.set_advanced(true);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, SidebarField::Temperature);

        state.set_advanced(false);
        assert_eq!(state.selected, SidebarField::WebSearch);
    }

    #[test]
    fn test_prompt_editing_emits_set_role_prompt() {
        let mut state = SidebarState::new("Hi", false);
        state.selected = SidebarField::RolePrompt;
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert!(state.editing_prompt);

        let event = state.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(
            event,
            Some(SidebarEvent::Action(Action::SetRolePrompt("Hi!".to_string())))
        );

        state.handle_event(&TuiEvent::Escape);
        assert!(!state.editing_prompt);
    }

    #[test]
    fn test_enter_opens_pickers() {
        let mut state = SidebarState::new("", false);
        state.selected = SidebarField::Model;
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(SidebarEvent::OpenPicker(PickerRequest::Model))
        );
        state.selected = SidebarField::Provider;
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(SidebarEvent::OpenPicker(PickerRequest::Provider))
        );
    }

    #[test]
    fn test_value_steps() {
        let mut state = SidebarState::new("", true);
        state.selected = SidebarField::Temperature;
        assert_eq!(
            state.handle_event(&TuiEvent::CursorRight),
            Some(SidebarEvent::Action(Action::StepTemperature(Step::Up)))
        );
        state.selected = SidebarField::MaxTokens;
        assert_eq!(
            state.handle_event(&TuiEvent::CursorLeft),
            Some(SidebarEvent::Action(Action::StepMaxTokens(Step::Down)))
        );
        state.selected = SidebarField::Provider;
        assert_eq!(
            state.handle_event(&TuiEvent::CursorRight),
            Some(SidebarEvent::CycleProvider(Step::Up))
        );
        state.selected = SidebarField::WebSearch;
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar(' ')),
            Some(SidebarEvent::Action(Action::ToggleWebSearch))
        );
    }

    #[test]
    fn test_render_shows_configuration() {
        let mut config = AgentConfig::default();
        config.select_provider(Provider::OpenAI);
        config.select_model("gpt-4o").unwrap();
        config.web_search = true;
        let state = SidebarState::new("Be terse.", true);

        let text = render_text(&state, &config);
        assert!(text.contains("Be terse."));
        assert!(text.contains("OpenAI"));
        assert!(text.contains("gpt-4o"));
        assert!(text.contains("[x]"));
        assert!(text.contains("0.7"));
        assert!(text.contains("1024"));
    }

    #[test]
    fn test_render_placeholders_without_selection() {
        let state = SidebarState::new("", false);
        let text = render_text(&state, &AgentConfig::default());
        assert!(text.contains("pick a provider"));
        assert!(!text.contains("Temperature"));
    }
}
