//! `salary-predict` library crate.
//!
//! The binary (`salary`) is a thin wrapper around this library so that:
//!
//! - encoding and inference are testable without spawning processes
//! - the form and the scripting commands share one pipeline
//! - the registry and model are passed in explicitly, never global

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod encoding;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod report;
pub mod tui;
