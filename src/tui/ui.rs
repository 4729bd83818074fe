//! Frame layout. Composes the components into the screen:
//!
//! ```text
//! ┌ title bar ─────────────────────────────────────────┐
//! ├ sidebar ──────┬ messages (or landing page) ────────┤
//! │               │                                    │
//! │               ├ composer ──────────────────────────┤
//! ├ help line ────┴────────────────────────────────────┤
//! ```
//!
//! The picker, when open, is drawn last as an overlay.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::sidebar::SIDEBAR_WIDTH;
use crate::tui::components::{LandingPage, MessageList, Picker, Sidebar, TitleBar};
use crate::tui::{Focus, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, body_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    // Title bar
    let mut title = TitleBar::new(
        title_target(app),
        app.status_message.clone(),
        app.is_loading,
        spinner_frame,
    );
    title.render(frame, title_area);

    // Sidebar takes a fixed column, but never more than half the body
    let main_area = if app.panels.sidebar_open {
        let width = SIDEBAR_WIDTH.min(body_area.width / 2);
        let [sidebar_area, main_area] = Layout::horizontal([Length(width), Min(0)]).areas(body_area);
        let focused = tui.focus == Focus::Sidebar && tui.picker.is_none();
        Sidebar::new(&tui.sidebar, &app.config, focused).render(frame, sidebar_area);
        main_area
    } else {
        body_area
    };

    let input_height = tui.input_box.calculate_height(main_area.width);
    let [messages_area, input_area] =
        Layout::vertical([Min(0), Length(input_height)]).areas(main_area);

    if app.conversation.is_empty() {
        tui.message_list.area = Rect::default();
        LandingPage::new(app.config.is_ready()).render(frame, messages_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            &app.conversation,
            app.is_loading,
            spinner_frame,
            tui.focus == Focus::Messages,
        )
        .render(frame, messages_area);
    }

    tui.input_box.render(frame, input_area);

    frame.render_widget(help_line(tui), help_area);

    if let Some(picker) = tui.picker.as_mut() {
        Picker::new(picker).render(frame, frame.area());
    }
}

/// "Provider · model" for the title bar, or just the provider while no
/// model is chosen.
fn title_target(app: &App) -> Option<String> {
    let provider = app.config.provider()?;
    Some(match app.config.model() {
        Some(model) => format!("{} · {}", provider.label(), model),
        None => provider.label().to_string(),
    })
}

/// Key hints for whatever currently has focus.
fn help_text(tui: &TuiState) -> &'static str {
    if tui.picker.is_some() {
        return "↑↓ choose  Enter select  Esc back";
    }
    match tui.focus {
        Focus::Composer => {
            "Enter send  Ctrl+J newline  Ctrl+W search this message  Tab focus  Ctrl+B sidebar  Ctrl+N new chat  Ctrl+Q quit"
        }
        Focus::Messages => "↑↓ select  c copy  d delete  r regenerate  PgUp/PgDn scroll  Esc back",
        Focus::Sidebar if tui.sidebar.editing_prompt => "Type the role prompt  Enter/Esc done",
        Focus::Sidebar => "↑↓ field  ←→ change  Enter edit/pick  Space toggle  Ctrl+G advanced  Esc back",
    }
}

fn help_line(tui: &TuiState) -> Line<'static> {
    Line::from(Span::styled(
        help_text(tui),
        Style::default().fg(Color::DarkGray),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;
    use crate::test_support::ready_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        tui.sync(app);
        terminal
            .draw(|f| {
                draw_ui(f, app, tui, 0);
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
    fn test_draw_ui_empty_shows_landing_and_sidebar() {
        let app = App::new();
        let mut tui = TuiState::new(&app);
        let text = render(&app, &mut tui);
        assert!(text.contains("Aurora Agent (not configured)"));
        assert!(text.contains("Agent"));
        assert!(text.contains("Role prompt"));
        assert!(text.contains("Choose a provider"));
        assert!(text.contains("Send disabled: Type a message"));
    }

    #[test]
    fn test_draw_ui_hidden_sidebar() {
        let mut app = App::new();
        app.panels.sidebar_open = false;
        let mut tui = TuiState::new(&app);
        let text = render(&app, &mut tui);
        assert!(!text.contains("Role prompt"));
        assert!(text.contains("Aurora Agent"));
    }

    #[test]
    fn test_draw_ui_with_messages() {
        let mut app = ready_app();
        app.conversation.push(Role::User, "ping".to_string());
        app.conversation.push(Role::Agent, "pong".to_string());
        let mut tui = TuiState::new(&app);
        let text = render(&app, &mut tui);
        assert!(text.contains("Groq · llama-3.3-70b-versatile"));
        assert!(text.contains("ping"));
        assert!(text.contains("pong"));
        assert_eq!(tui.message_list.heights.len(), 2);
    }

    #[test]
    fn test_draw_ui_picker_overlay() {
        let app = App::new();
        let mut tui = TuiState::new(&app);
        tui.picker = Some(crate::tui::components::PickerState::providers(None));
        let text = render(&app, &mut tui);
        assert!(text.contains("Groq"));
        assert!(text.contains("OpenAI"));
        assert!(text.contains("Enter select"));
    }

    #[test]
    fn test_title_target() {
        let mut app = App::new();
        assert_eq!(title_target(&app), None);
        app.config.select_provider(crate::core::agent::Provider::OpenAI);
        assert_eq!(title_target(&app), Some("OpenAI".to_string()));
        app.config.select_model("gpt-4o").unwrap();
        assert_eq!(title_target(&app), Some("OpenAI · gpt-4o".to_string()));
    }
}
