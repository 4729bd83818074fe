//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::backend::{BackendError, ReplyBackend, ReplyRequest};
use crate::core::agent::Provider;
use crate::core::state::App;

/// A backend that always fails, for exercising the error path.
pub struct FailingBackend;

#[async_trait]
impl ReplyBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    async fn reply(&self, _request: &ReplyRequest) -> Result<String, BackendError> {
        Err(BackendError::Unavailable("test failure".to_string()))
    }
}

/// Creates an App with Groq and its first model selected.
pub fn ready_app() -> App {
    let mut app = App::new();
    app.config.select_provider(Provider::Groq);
    app.config
        .select_model("llama-3.3-70b-versatile")
        .expect("model is in the Groq catalogue");
    app
}
