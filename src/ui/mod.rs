//! # User Interface
//!
//! Colored terminal output, clickable file links and report rendering.

pub mod log;
pub mod report;

pub use log::{debug, error, header, info, path_link, success, warn, Log};
