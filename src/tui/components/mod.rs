//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: top status line
//! - `Message`: a single conversation message
//! - `LandingPage`: empty-conversation welcome
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep presentation state and emit events to the parent:
//! - `InputBox`: the composer
//! - `MessageList`: scrollable conversation with selection and actions
//! - `Sidebar`: agent configuration form
//! - `Picker`: provider/model overlay
//!
//! Stateful components split into a persistent `*State` (owned by
//! `TuiState`) and a transient wrapper built each frame with borrowed props.
//! Events flow up as component-specific enums; the parent turns them into
//! core `Action`s.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status line)
//! ├── sidebar.rs       (Agent configuration form)
//! ├── picker.rs        (Provider / model overlay)
//! ├── message.rs       (Single message renderer)
//! ├── message_list.rs  (Scrollable message container)
//! ├── input_box.rs     (Composer)
//! ├── text_field.rs    (Shared editable buffer)
//! └── landing.rs       (Empty state)
//! ```

pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
pub mod picker;
pub mod sidebar;
pub mod text_field;
mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use landing::LandingPage;
pub use message_list::{MessageList, MessageListEvent, MessageListState};
pub use picker::{Picker, PickerChoice, PickerEvent, PickerState};
pub use sidebar::{PickerRequest, Sidebar, SidebarEvent, SidebarState};
pub use title_bar::TitleBar;
