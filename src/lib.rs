//! Menu Board - Restaurant Menu Library
//!
//! A terminal application for keeping a restaurant menu and a log of the
//! changes made to it, persisted in a local key-value store.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
