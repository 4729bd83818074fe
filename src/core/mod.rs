//! # Core Application Logic
//!
//! Aurora's state and business rules. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │  Backend   │
//!            │  Adapter   │            │ (simulated)│
//!            │ (ratatui)  │            │            │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all component state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`agent`]: Provider/model catalogue and agent settings
//! - [`message`]: Messages and the conversation list
//! - [`config`]: Startup configuration (file, env, CLI)

pub mod action;
pub mod agent;
pub mod config;
pub mod message;
pub mod state;
