//! Application layer managing state and business workflows.
//!
//! This module owns the session's menu and history repositories and the
//! UI state that the presentation layer renders and mutates.

mod collection;
pub mod history;
pub mod menu;
pub mod state;

pub use history::*;
pub use menu::*;
pub use state::*;
