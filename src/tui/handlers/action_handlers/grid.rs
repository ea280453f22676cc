// Grid editing action handlers

use crate::tui::AppState;
use anyhow::Result;

/// Apply the active tool at the cursor
pub fn handle_activate(state: &mut AppState) -> Result<bool> {
    let (row, col) = state.cursor;
    state.activate(row, col);
    Ok(false)
}

/// Remove the module under the cursor
pub fn handle_erase_cell(state: &mut AppState) -> Result<bool> {
    let (row, col) = state.cursor;
    state.erase(row, col);
    Ok(false)
}
