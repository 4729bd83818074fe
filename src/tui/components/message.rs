use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Message as ChatMessage, Role};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one chat message.
///
/// Created fresh each frame by `MessageList`. The title carries the author
/// and local send time; when selected, the bottom border lists the message
/// actions.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
    pub is_selected: bool,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage, is_selected: bool) -> Self {
        Self {
            message,
            is_selected,
        }
    }

    /// Predicts rendered height at `width` without rendering.
    ///
    /// The wrap options mirror ratatui's `Paragraph` word wrapping so the
    /// scroll view can be sized before drawing.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let content = message.content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Green),
        Role::Agent => Style::default().fg(Color::Blue),
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = role_style(self.message.role);
        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let timestamp = self
            .message
            .created_at
            .with_timezone(&Local)
            .format("%H:%M");
        let title = format!(" {} · {} ", self.message.role.label(), timestamp);

        let mut block = Block::bordered()
            .title(title)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        if self.is_selected {
            let mut actions = vec![Span::raw(" c copy  d delete ")];
            if self.message.role == Role::Agent {
                actions.push(Span::raw(" r regenerate "));
            }
            block = block.title_bottom(Line::from(actions).right_aligned());
        }

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.content.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn make(role: Role, content: &str) -> ChatMessage {
        ChatMessage::new(role, content.to_string())
    }

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        assert_eq!(Message::calculate_height(&make(Role::User, "  \n"), 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        assert_eq!(Message::calculate_height(&make(Role::User, "Hello"), 0), 1);
        assert_eq!(
            Message::calculate_height(&make(Role::User, "Hello"), HORIZONTAL_OVERHEAD),
            1
        );
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        // content_width = 9 - 4 = 5 → "Hello" | "world"
        assert_eq!(
            Message::calculate_height(&make(Role::Agent, "Hello world"), 9),
            2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_breaks_long_words() {
        // content_width = 4 → "abcd" | "efgh" | "ij"
        assert_eq!(
            Message::calculate_height(&make(Role::Agent, "abcdefghij"), 8),
            3 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_saturates_for_huge_messages() {
        let tall = make(Role::User, &"a\n".repeat(65_534));
        assert_eq!(Message::calculate_height(&tall, 80), u16::MAX);
    }

    #[test]
    fn role_styles_differ() {
        assert_eq!(role_style(Role::User).fg, Some(Color::Green));
        assert_eq!(role_style(Role::Agent).fg, Some(Color::Blue));
    }

    #[test]
    fn selected_agent_message_lists_actions() {
        let message = make(Role::Agent, "reply");
        let backend = TestBackend::new(60, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(Message::new(&message, true), f.area());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("aurora"));
        assert!(text.contains("reply"));
        assert!(text.contains("copy"));
        assert!(text.contains("regenerate"));
    }
}
