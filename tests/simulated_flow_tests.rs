use std::time::Duration;

use aurora::backend::{BackendError, ReplyBackend, ReplyRequest, SimulatedBackend};
use aurora::core::action::{Action, Effect, update};
use aurora::core::agent::Provider;
use aurora::core::message::Role;
use aurora::core::state::App;
use tokio::time::{Instant, timeout};
use tokio_test::{assert_err, assert_ok};

// ============================================================================
// Helper Functions
// ============================================================================

/// Creates an app with OpenAI / gpt-4o selected through the reducer
fn configured_app() -> App {
    let mut app = App::new();
    update(&mut app, Action::SelectProvider(Provider::OpenAI));
    update(&mut app, Action::SelectModel("gpt-4o".to_string()));
    assert!(app.config.is_ready());
    app
}

/// Submits `text` and returns the request the reducer asked to spawn
fn submit(app: &mut App, text: &str) -> ReplyRequest {
    match update(app, Action::Submit(text.to_string())) {
        Effect::SpawnReply(request) => request,
        other => panic!("Expected SpawnReply, got {:?}", other),
    }
}

// ============================================================================
// SimulatedBackend
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_reply_waits_for_configured_delay() {
    let backend = SimulatedBackend::new(Duration::from_millis(1000));
    let mut app = configured_app();
    let request = submit(&mut app, "hello");

    let start = Instant::now();
    let text = assert_ok!(backend.reply(&request).await);

    assert!(start.elapsed() >= Duration::from_millis(1000));
    assert_eq!(text, "This is a simulated response from OpenAI using gpt-4o.");
}

#[tokio::test(start_paused = true)]
async fn test_reply_not_ready_before_delay() {
    let backend = SimulatedBackend::new(Duration::from_millis(1000));
    let mut app = configured_app();
    let request = submit(&mut app, "hello");

    let early = timeout(Duration::from_millis(999), backend.reply(&request)).await;
    assert_err!(early);
}

#[tokio::test]
async fn test_reply_rejects_missing_model() {
    let backend = SimulatedBackend::new(Duration::ZERO);
    let mut app = configured_app();
    let mut request = submit(&mut app, "hello");
    request.model = String::new();

    let err = assert_err!(backend.reply(&request).await);
    assert!(matches!(err, BackendError::InvalidRequest(_)));
}

// ============================================================================
// Reducer + backend round trip
// ============================================================================

#[tokio::test]
async fn test_send_and_receive_with_message_search() {
    let backend = SimulatedBackend::new(Duration::ZERO);
    let mut app = configured_app();
    app.config.role_prompt = "You are terse.".to_string();
    update(&mut app, Action::ToggleMessageWebSearch);

    let request = submit(&mut app, "what's new?");
    assert!(request.web_search);
    assert_eq!(request.system_prompt, "You are terse.");
    assert_eq!(request.messages, vec!["what's new?"]);
    assert!(app.is_loading);
    // The per-message toggle is spent on this send
    assert!(!app.config.message_web_search);

    let text = assert_ok!(backend.reply(&request).await);
    update(
        &mut app,
        Action::ReplyArrived {
            request_id: request.id,
            text,
        },
    );

    assert!(!app.is_loading);
    let messages = app.conversation.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, Role::Agent);
    assert!(messages[1]
        .content
        .ends_with("Web search was enabled for this message."));

    // Follow-up carries the whole history
    let second = submit(&mut app, "thanks");
    assert!(!second.web_search);
    assert_eq!(second.messages.len(), 3);
    assert_ne!(second.id, request.id);
}

#[tokio::test]
async fn test_reply_after_new_chat_is_dropped() {
    let backend = SimulatedBackend::new(Duration::ZERO);
    let mut app = configured_app();
    let request = submit(&mut app, "hello");

    update(&mut app, Action::NewChat);
    assert!(!app.is_loading);

    let text = assert_ok!(backend.reply(&request).await);
    update(
        &mut app,
        Action::ReplyArrived {
            request_id: request.id,
            text,
        },
    );
    assert!(app.conversation.is_empty());
}

#[tokio::test]
async fn test_failed_reply_clears_loading_without_message() {
    let mut app = configured_app();
    let request = submit(&mut app, "hello");

    update(
        &mut app,
        Action::ReplyFailed {
            request_id: request.id,
            error: "backend unavailable".to_string(),
        },
    );

    assert!(!app.is_loading);
    assert_eq!(app.pending_reply, None);
    assert_eq!(app.conversation.len(), 1);
    // Sending works again
    submit(&mut app, "retry");
}

#[test]
fn test_selecting_provider_clears_model() {
    let mut app = configured_app();
    update(&mut app, Action::SelectProvider(Provider::Groq));
    assert_eq!(app.config.provider(), Some(Provider::Groq));
    assert_eq!(app.config.model(), None);
    assert!(!app.can_send("hello"));
}
