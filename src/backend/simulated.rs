//! Simulated backend.
//!
//! Waits a fixed delay and fabricates a canned reply naming the provider and
//! model. Nothing leaves the process.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};

use crate::backend::{BackendError, ReplyBackend, ReplyRequest};

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

pub struct SimulatedBackend {
    delay: Duration,
}

impl SimulatedBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

/// The canned reply text for a request.
pub fn canned_reply(request: &ReplyRequest) -> String {
    let mut reply = format!(
        "This is a simulated response from {} using {}.",
        request.provider.label(),
        request.model
    );
    if request.web_search {
        reply.push_str(" Web search was enabled for this message.");
    }
    reply
}

#[async_trait]
impl ReplyBackend for SimulatedBackend {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn reply(&self, request: &ReplyRequest) -> Result<String, BackendError> {
        if request.model.trim().is_empty() {
            return Err(BackendError::InvalidRequest("no model selected".to_string()));
        }

        info!(
            "Simulating reply {} from {} ({}) after {:?}",
            request.id, request.provider, request.model, self.delay
        );
        debug!(
            "Request carries {} message(s), web_search={}",
            request.messages.len(),
            request.web_search
        );

        tokio::time::sleep(self.delay).await;
        Ok(canned_reply(request))
    }
}
