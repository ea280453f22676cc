//! Action handlers organized by category

/// Placing and erasing modules at the cursor
pub mod grid;

/// Cursor movement handlers
pub mod navigation;

/// Popup and overlay management handlers
pub mod popups;

/// Schema lifecycle handlers (new, clear, export)
pub mod schema;

/// Tool, color, phase and text selection handlers
pub mod selection;
