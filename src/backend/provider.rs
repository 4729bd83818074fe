use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::core::agent::Provider;

/// Errors a reply backend can report.
///
/// The front-end does not classify these for the user; any variant ends the
/// pending send the same way.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// The request is missing something the backend needs.
    InvalidRequest(String),
    /// The backend could not produce a reply.
    Unavailable(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            BackendError::Unavailable(msg) => write!(f, "backend unavailable: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Correlates a reply with the send that asked for it.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The outbound request built on send. Only ever handed to a local backend.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReplyRequest {
    pub id: RequestId,
    pub provider: Provider,
    pub model: String,
    pub system_prompt: String,
    /// Conversation texts in order, ending with the message just sent.
    pub messages: Vec<String>,
    pub web_search: bool,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait ReplyBackend: Send + Sync {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    /// Produces the agent's reply for the given request.
    async fn reply(&self, request: &ReplyRequest) -> Result<String, BackendError>;
}
