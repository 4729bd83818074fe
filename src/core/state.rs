//! # Application State
//!
//! Core state for Aurora. Domain only, no TUI types. Focus, scroll and
//! input buffers live in the `tui` module.
//!
//! ```text
//! App
//! ├── config: AgentConfig           // sidebar settings
//! ├── conversation: Conversation    // message history
//! ├── status_message: String        // status bar text
//! ├── is_loading: bool              // waiting for the simulated reply
//! ├── pending_reply: Option<RequestId>
//! ├── next_request_id: u64
//! └── panels: Panels                // sidebar / advanced visibility
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::backend::{ReplyRequest, RequestId};
use crate::core::agent::AgentConfig;
use crate::core::config::ResolvedConfig;
use crate::core::message::Conversation;
use log::warn;

pub const WELCOME_STATUS: &str = "Welcome to Aurora Agent";

/// Which optional panels are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub sidebar_open: bool,
    /// Temperature and max tokens section of the sidebar.
    pub advanced_open: bool,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            advanced_open: false,
        }
    }
}

/// Why the send control is disabled, if it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendBlocker {
    EmptyMessage,
    NoProvider,
    NoModel,
    AwaitingReply,
}

impl SendBlocker {
    pub fn hint(self) -> &'static str {
        match self {
            SendBlocker::EmptyMessage => "Type a message",
            SendBlocker::NoProvider => "Select a provider",
            SendBlocker::NoModel => "Select a model",
            SendBlocker::AwaitingReply => "Waiting for reply",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct App {
    pub config: AgentConfig,
    pub conversation: Conversation,
    pub status_message: String,
    pub is_loading: bool,
    /// Request whose reply we are waiting for. Replies for anything else are stale.
    pub pending_reply: Option<RequestId>,
    pub next_request_id: u64,
    pub panels: Panels,
}

impl App {
    pub fn new() -> Self {
        Self {
            status_message: WELCOME_STATUS.to_string(),
            ..Default::default()
        }
    }

    /// Seeds the state from resolved startup configuration.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new();
        app.config.role_prompt = config.role_prompt.clone();
        if let Some(provider) = config.provider {
            app.config.select_provider(provider);
            if let Some(ref model) = config.model {
                if let Err(e) = app.config.select_model(model) {
                    warn!("Configured model '{}' rejected: {}", model, e);
                }
            }
        }
        app.config.web_search = config.web_search;
        app.config.temperature = config.temperature;
        app.config.max_tokens = config.max_tokens;
        app.panels.sidebar_open = config.sidebar_open;
        app
    }

    /// The first reason `draft` cannot be sent, or None when sending is allowed.
    pub fn send_blocker(&self, draft: &str) -> Option<SendBlocker> {
        if self.is_loading {
            Some(SendBlocker::AwaitingReply)
        } else if draft.trim().is_empty() {
            Some(SendBlocker::EmptyMessage)
        } else if self.config.provider().is_none() {
            Some(SendBlocker::NoProvider)
        } else if self.config.model().is_none() {
            Some(SendBlocker::NoModel)
        } else {
            None
        }
    }

    pub fn can_send(&self, draft: &str) -> bool {
        self.send_blocker(draft).is_none()
    }

    /// Builds the outbound request from the current configuration and history.
    /// Returns None unless provider and model are both selected.
    pub fn build_request(&mut self) -> Option<ReplyRequest> {
        let provider = self.config.provider()?;
        let model = self.config.model()?.to_string();
        self.next_request_id += 1;
        Some(ReplyRequest {
            id: RequestId(self.next_request_id),
            provider,
            model,
            system_prompt: self.config.role_prompt.clone(),
            messages: self.conversation.texts(),
            web_search: self.config.search_enabled(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        })
    }
}
