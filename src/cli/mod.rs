//! CLI command handlers for LazyPanel.
//!
//! This module provides headless, scriptable access to the schema editor
//! for automation and testing.

pub mod clear;
pub mod common;
pub mod config;
pub mod erase;
pub mod export;
pub mod new;
pub mod place;
pub mod show;

// Re-export types used by main.rs and tests
pub use clear::ClearArgs;
pub use common::{CliError, CliResult, ExitCode, GlobalOptions};
pub use config::ConfigArgs;
pub use erase::EraseArgs;
pub use export::ExportArgs;
pub use new::NewArgs;
pub use place::PlaceArgs;
pub use show::ShowArgs;
