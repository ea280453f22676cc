//! LazyPanel library.
//!
//! Core of the electrical panel schema builder: the grid model, placement
//! rules, snapshot persistence and PNG export, plus the terminal UI and CLI
//! that drive them.

pub mod branding;
pub mod cli;
pub mod config;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
#[cfg(feature = "ratatui")]
pub mod shortcuts;
#[cfg(feature = "ratatui")]
pub mod tui;
