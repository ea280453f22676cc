// Schema lifecycle action handlers

use crate::models::GridDimensions;
use crate::tui::text_input::DimensionsDialog;
use crate::tui::{ActiveComponent, AppState, PopupType};
use anyhow::Result;

/// Open the new-schema form, pre-filled with the current or configured size
pub fn handle_new_schema(state: &mut AppState) -> Result<bool> {
    let defaults = state
        .editor
        .grid()
        .map(|grid| {
            let (rows, cols) = grid.dimensions();
            GridDimensions { rows, cols }
        })
        .unwrap_or_else(|| state.config.default_dimensions());
    state.open_component(
        PopupType::NewSchema,
        ActiveComponent::Dimensions(DimensionsDialog::new(defaults)),
    );
    Ok(false)
}

/// Ask before clearing the schema
pub fn handle_clear_schema(state: &mut AppState) -> Result<bool> {
    if state.editor.grid().is_none() {
        state.set_status("Nothing to clear");
    } else {
        state.active_popup = Some(PopupType::ConfirmClear);
    }
    Ok(false)
}

/// Export the schema as PNG
pub fn handle_export(state: &mut AppState) -> Result<bool> {
    state.export();
    Ok(false)
}

/// Handle quit action
pub fn handle_quit(state: &mut AppState) -> Result<bool> {
    state.should_quit = true;
    Ok(true)
}
