//! Presentation layer handling terminal UI and user input.
//!
//! This module draws the menu, add-dish and history screens using ratatui
//! and turns key presses into application operations.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
