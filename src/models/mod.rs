//! Data models for panel schemas.
//!
//! This module contains the core data structures used throughout the application.
//! Models are designed to be independent of UI and persistence.

pub mod grid;
pub mod module;
pub mod rgb;
pub mod selection;

// Re-export all model types
pub use grid::{
    cell_label, parse_cell_label, row_label, GridDimensions, GridState, MAX_COLS, MAX_ROWS,
};
pub use module::{Module, ModuleKind, PhaseLabel, RCD_COLOR};
pub use rgb::{contrast_text_color, RgbColor};
pub use selection::{Selection, Tool, PRESET_COLORS};
