//! # Landing Page Component
//!
//! Shown in place of the message list while the conversation is empty.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct LandingPage {
    /// Provider and model are selected
    pub ready: bool,
}

impl LandingPage {
    pub fn new(ready: bool) -> Self {
        Self { ready }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let hint = if self.ready {
            "Type a message below and press Enter"
        } else {
            "Choose a provider and model in the sidebar (Tab to focus it)"
        };
        vec![
            Line::from(Span::styled(
                "Aurora Agent",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
            Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
        ]
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let [text_area] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);
    }
}
