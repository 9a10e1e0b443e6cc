//! Infrastructure layer providing external service integrations.
//!
//! This module contains the key-value store backends, environment
//! configuration, log file setup and CSV export.

pub mod config;
pub mod csv_export;
pub mod logging;
pub mod persistence;

pub use config::*;
pub use csv_export::*;
pub use logging::*;
pub use persistence::*;
