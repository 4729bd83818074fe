//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Focus
//!
//! Keystrokes go to one of three regions: the composer, the message list,
//! or the sidebar. Tab / Shift+Tab cycle between them (the sidebar is
//! skipped while hidden). While the picker overlay is open it receives
//! everything except quit.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::backend::{ReplyBackend, ReplyRequest, SimulatedBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::agent::{Provider, Step};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, SendBlocker};
use crate::core::message::Role;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    InputBox, InputEvent, MessageListEvent, MessageListState, PickerChoice, PickerEvent,
    PickerRequest, PickerState, SidebarEvent, SidebarState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which region receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Composer,
    Messages,
    Sidebar,
}

impl Focus {
    pub fn next(self, sidebar_open: bool) -> Focus {
        match self {
            Focus::Composer => Focus::Messages,
            Focus::Messages if sidebar_open => Focus::Sidebar,
            Focus::Messages | Focus::Sidebar => Focus::Composer,
        }
    }

    pub fn prev(self, sidebar_open: bool) -> Focus {
        match self {
            Focus::Composer if sidebar_open => Focus::Sidebar,
            Focus::Composer | Focus::Sidebar => Focus::Messages,
            Focus::Messages => Focus::Composer,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    // Persistent component states
    pub input_box: InputBox,
    pub sidebar: SidebarState,
    pub message_list: MessageListState,
    // Picker overlay (None = hidden)
    pub picker: Option<PickerState>,
    // Created on first copy and kept alive: on X11/Wayland the owning
    // instance serves the selection, so dropping it loses the copied text
    clipboard: Option<arboard::Clipboard>,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            focus: Focus::Composer, // User expects to type immediately
            input_box: InputBox::new(),
            sidebar: SidebarState::new(&app.config.role_prompt, app.panels.advanced_open),
            message_list: MessageListState::new(),
            picker: None,
            clipboard: None,
        }
    }

    /// Pushes props derived from `App` into the component states.
    pub fn sync(&mut self, app: &App) {
        if self.focus == Focus::Sidebar && !app.panels.sidebar_open {
            self.focus = Focus::Composer;
        }
        self.input_box.send_hint = app
            .send_blocker(self.input_box.text())
            .map(SendBlocker::hint);
        self.input_box.search_next = app.config.message_web_search;
        self.input_box.focused = self.focus == Focus::Composer && self.picker.is_none();
        self.sidebar.set_advanced(app.panels.advanced_open);
        self.message_list.set_item_count(app.conversation.len());
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), arboard::Error> {
        let mut clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        let result = clipboard.set_text(text);
        self.clipboard = Some(clipboard);
        result
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.sidebar.editing_prompt = false;
        if focus != Focus::Messages {
            self.message_list.selected_index = None;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter be told apart from Enter.
        // Terminals without it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn ReplyBackend> = Arc::new(SimulatedBackend::new(config.reply_delay));
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable terminal modes: {}", e));

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'event_loop: loop {
        tui.sync(&app);

        let animating = app.is_loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = route_event(&app, &mut tui, event) else {
                continue;
            };
            debug!("Dispatching {:?}", action);
            let effect = update(&mut app, action);
            if apply_effect(effect, &mut app, &mut tui, &backend, &tx) {
                break 'event_loop;
            }
            tui.sync(&app);
        }

        // Replies from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if apply_effect(effect, &mut app, &mut tui, &backend, &tx) {
                break 'event_loop;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Translates a terminal event into at most one core action, updating
/// presentation state (focus, selection, overlays) along the way.
fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    if event == TuiEvent::Quit {
        return Some(Action::Quit);
    }

    // The picker captures everything while open
    if let Some(picker) = tui.picker.as_mut() {
        return match picker.handle_event(&event)? {
            PickerEvent::Chosen(PickerChoice::Provider(provider)) => {
                // Straight on to the new provider's models
                tui.picker = Some(PickerState::models(provider, None));
                Some(Action::SelectProvider(provider))
            }
            PickerEvent::Chosen(PickerChoice::Model(model)) => {
                tui.picker = None;
                Some(Action::SelectModel(model))
            }
            PickerEvent::Dismiss => {
                tui.picker = None;
                None
            }
        };
    }

    match event {
        TuiEvent::Resize => return None,
        TuiEvent::ToggleSidebar => return Some(Action::ToggleSidebar),
        TuiEvent::ToggleAdvanced => return Some(Action::ToggleAdvanced),
        TuiEvent::ToggleMessageSearch => return Some(Action::ToggleMessageWebSearch),
        TuiEvent::NewChat => {
            tui.message_list = MessageListState::new();
            tui.set_focus(Focus::Composer);
            return Some(Action::NewChat);
        }
        TuiEvent::FocusNext => {
            tui.set_focus(tui.focus.next(app.panels.sidebar_open));
            return None;
        }
        TuiEvent::FocusPrev => {
            tui.set_focus(tui.focus.prev(app.panels.sidebar_open));
            return None;
        }
        // Scrolling works regardless of focus
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            return None;
        }
        TuiEvent::MouseClick(column, row) => {
            if let Some(idx) = tui.message_list.hit_test(column, row) {
                tui.set_focus(Focus::Messages);
                tui.message_list.selected_index = Some(idx);
            }
            return None;
        }
        _ => {}
    }

    match tui.focus {
        Focus::Composer => route_composer(app, tui, &event),
        Focus::Messages => route_messages(app, tui, &event),
        Focus::Sidebar => route_sidebar(app, tui, &event),
    }
}

fn route_composer(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if *event == TuiEvent::Escape {
        tui.set_focus(Focus::Messages);
        tui.message_list.selected_index = app.conversation.len().checked_sub(1);
        tui.message_list.scroll_to_selected();
        return None;
    }
    match tui.input_box.handle_event(event)? {
        InputEvent::SubmitRequested => {
            // A blocked submit still goes through update() so the reason
            // lands in the status line; the draft stays in the box.
            let draft = if app.can_send(tui.input_box.text()) {
                tui.input_box.take()
            } else {
                tui.input_box.text().to_string()
            };
            Some(Action::Submit(draft))
        }
        InputEvent::ContentChanged => None,
    }
}

fn route_messages(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if *event == TuiEvent::Submit {
        tui.set_focus(Focus::Composer);
        return None;
    }
    let id_at = |idx: usize| app.conversation.messages().get(idx).map(|m| m.id.clone());
    match tui.message_list.handle_event(event)? {
        MessageListEvent::Copy(idx) => id_at(idx).map(Action::CopyMessage),
        MessageListEvent::Delete(idx) => id_at(idx).map(Action::DeleteMessage),
        MessageListEvent::Regenerate(idx) => app
            .conversation
            .messages()
            .get(idx)
            .filter(|m| m.role == Role::Agent)
            .map(|m| Action::RegenerateMessage(m.id.clone())),
        MessageListEvent::Leave => {
            tui.set_focus(Focus::Composer);
            None
        }
    }
}

fn route_sidebar(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match tui.sidebar.handle_event(event)? {
        SidebarEvent::Action(action) => Some(action),
        SidebarEvent::OpenPicker(PickerRequest::Provider) => {
            tui.picker = Some(PickerState::providers(app.config.provider()));
            None
        }
        SidebarEvent::OpenPicker(PickerRequest::Model) => {
            tui.picker = Some(match app.config.provider() {
                Some(provider) => PickerState::models(provider, app.config.model()),
                // No catalogue without a provider; ask for that first
                None => PickerState::providers(None),
            });
            None
        }
        SidebarEvent::CycleProvider(step) => {
            let provider = match (app.config.provider(), step) {
                (Some(current), Step::Up) => current.next(),
                (Some(current), Step::Down) => current.prev(),
                (None, _) => Provider::Groq,
            };
            Some(Action::SelectProvider(provider))
        }
        SidebarEvent::Leave => {
            tui.set_focus(Focus::Composer);
            None
        }
    }
}

/// Carries out a side effect requested by `update()`. Returns true to quit.
fn apply_effect(
    effect: Effect,
    app: &mut App,
    tui: &mut TuiState,
    backend: &Arc<dyn ReplyBackend>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::SpawnReply(request) => {
            spawn_reply(Arc::clone(backend), request, tx.clone());
        }
        Effect::CopyToClipboard(text) => match tui.copy_to_clipboard(&text) {
            Ok(()) => {
                info!("Copied {} bytes to clipboard", text.len());
                app.status_message = "Copied to clipboard".to_string();
            }
            Err(e) => {
                warn!("Clipboard copy failed: {}", e);
                app.status_message = format!("Copy failed: {e}");
            }
        },
    }
    false
}

/// Runs the backend on the tokio runtime and posts the outcome back to the
/// event loop as `ReplyArrived` / `ReplyFailed`.
fn spawn_reply(
    backend: Arc<dyn ReplyBackend>,
    request: ReplyRequest,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    info!("Spawning reply {} on '{}' backend", request.id, backend.name());
    match serde_json::to_string(&request) {
        Ok(json) => debug!("Reply request: {}", json),
        Err(e) => warn!("Failed to serialize reply request {}: {}", request.id, e),
    }

    tokio::spawn(async move {
        let request_id = request.id;
        let action = match backend.reply(&request).await {
            Ok(text) => Action::ReplyArrived { request_id, text },
            Err(e) => Action::ReplyFailed {
                request_id,
                error: e.to_string(),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver reply {}: receiver dropped", request_id);
        }
    })
}
