pub mod provider;
pub mod simulated;

pub use provider::{BackendError, ReplyBackend, ReplyRequest, RequestId};
pub use simulated::SimulatedBackend;
