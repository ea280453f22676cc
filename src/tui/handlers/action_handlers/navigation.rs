// Cursor navigation action handlers

use crate::tui::AppState;
use anyhow::Result;

/// Handle navigate up action
pub fn handle_navigate_up(state: &mut AppState) -> Result<bool> {
    state.cursor.0 = state.cursor.0.saturating_sub(1);
    Ok(false)
}

/// Handle navigate down action
pub fn handle_navigate_down(state: &mut AppState) -> Result<bool> {
    let (rows, _) = state.grid_view.dimensions();
    if state.cursor.0 + 1 < rows {
        state.cursor.0 += 1;
    }
    Ok(false)
}

/// Handle navigate left action
pub fn handle_navigate_left(state: &mut AppState) -> Result<bool> {
    state.cursor.1 = state.cursor.1.saturating_sub(1);
    Ok(false)
}

/// Handle navigate right action
pub fn handle_navigate_right(state: &mut AppState) -> Result<bool> {
    let (_, cols) = state.grid_view.dimensions();
    if state.cursor.1 + 1 < cols {
        state.cursor.1 += 1;
    }
    Ok(false)
}

/// Jump to the first column of the row
pub fn handle_jump_to_first(state: &mut AppState) -> Result<bool> {
    state.cursor.1 = 0;
    Ok(false)
}

/// Jump to the last column of the row
pub fn handle_jump_to_last(state: &mut AppState) -> Result<bool> {
    let (_, cols) = state.grid_view.dimensions();
    state.cursor.1 = cols.saturating_sub(1);
    Ok(false)
}
