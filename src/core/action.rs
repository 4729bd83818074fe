//! # Actions
//!
//! Everything that can happen in Aurora becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The simulated reply lands? That's `Action::ReplyArrived { .. }`.
//!
//! `update()` applies an action to the state and returns an [`Effect`] the
//! adapter must carry out (spawn the reply, write the clipboard, quit).
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  State' + Effect
//! ```

use log::{error, info, warn};

use crate::backend::{ReplyRequest, RequestId};
use crate::core::agent::{Provider, Step};
use crate::core::message::{MessageId, Role};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Send the composer text.
    Submit(String),
    /// The simulated backend produced a reply.
    ReplyArrived { request_id: RequestId, text: String },
    /// The simulated send failed.
    ReplyFailed { request_id: RequestId, error: String },
    DeleteMessage(MessageId),
    CopyMessage(MessageId),
    RegenerateMessage(MessageId),
    SelectProvider(Provider),
    SelectModel(String),
    SetRolePrompt(String),
    ToggleWebSearch,
    ToggleMessageWebSearch,
    StepTemperature(Step),
    StepMaxTokens(Step),
    ToggleSidebar,
    ToggleAdvanced,
    /// Start over with an empty conversation.
    NewChat,
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    SpawnReply(ReplyRequest),
    CopyToClipboard(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if let Some(blocker) = app.send_blocker(&text) {
                app.status_message = blocker.hint().to_string();
                return Effect::None;
            }
            app.conversation.push(Role::User, text);
            let Some(request) = app.build_request() else {
                // send_blocker guarantees provider and model
                return Effect::None;
            };
            // The per-message toggle applies to this send only
            app.config.message_web_search = false;
            app.is_loading = true;
            app.pending_reply = Some(request.id);
            app.status_message = format!("Waiting for {}...", request.provider);
            info!(
                "Submitted message, request {} to {} ({})",
                request.id, request.provider, request.model
            );
            Effect::SpawnReply(request)
        }
        Action::ReplyArrived { request_id, text } => {
            if app.pending_reply != Some(request_id) {
                warn!("Dropping stale reply for request {}", request_id);
                return Effect::None;
            }
            app.conversation.push(Role::Agent, text);
            app.pending_reply = None;
            app.is_loading = false;
            app.status_message.clear();
            Effect::None
        }
        Action::ReplyFailed { request_id, error } => {
            error!("Reply for request {} failed: {}", request_id, error);
            if app.pending_reply == Some(request_id) {
                app.pending_reply = None;
                app.is_loading = false;
                app.status_message.clear();
            }
            Effect::None
        }
        Action::DeleteMessage(id) => {
            if app.conversation.remove(&id).is_some() {
                app.status_message = "Message deleted".to_string();
            } else {
                warn!("Delete requested for unknown message {}", id);
            }
            Effect::None
        }
        Action::CopyMessage(id) => match app.conversation.get(&id) {
            Some(message) => Effect::CopyToClipboard(message.content.clone()),
            None => {
                warn!("Copy requested for unknown message {}", id);
                Effect::None
            }
        },
        Action::RegenerateMessage(id) => {
            info!("Regenerate requested for message {}", id);
            app.status_message = "Regenerate is not available yet".to_string();
            Effect::None
        }
        Action::SelectProvider(provider) => {
            app.config.select_provider(provider);
            app.status_message = format!("Provider: {provider}. Select a model");
            Effect::None
        }
        Action::SelectModel(model) => {
            match app.config.select_model(&model) {
                Ok(()) => app.status_message = format!("Model: {model}"),
                Err(e) => app.status_message = e.to_string(),
            }
            Effect::None
        }
        Action::SetRolePrompt(prompt) => {
            app.config.role_prompt = prompt;
            Effect::None
        }
        Action::ToggleWebSearch => {
            app.config.web_search = !app.config.web_search;
            app.status_message = format!("Web search: {}", on_off(app.config.web_search));
            Effect::None
        }
        Action::ToggleMessageWebSearch => {
            app.config.message_web_search = !app.config.message_web_search;
            app.status_message = format!(
                "Search this message: {}",
                on_off(app.config.message_web_search)
            );
            Effect::None
        }
        Action::StepTemperature(step) => {
            app.config.step_temperature(step);
            Effect::None
        }
        Action::StepMaxTokens(step) => {
            app.config.step_max_tokens(step);
            Effect::None
        }
        Action::ToggleSidebar => {
            app.panels.sidebar_open = !app.panels.sidebar_open;
            Effect::None
        }
        Action::ToggleAdvanced => {
            app.panels.advanced_open = !app.panels.advanced_open;
            Effect::None
        }
        Action::NewChat => {
            app.conversation.clear();
            app.pending_reply = None;
            app.is_loading = false;
            app.status_message = "New chat".to_string();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
