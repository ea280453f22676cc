// Popup management action handlers

use crate::tui::{AppState, PopupType};
use anyhow::Result;

/// Toggle the help overlay
pub fn handle_toggle_help(state: &mut AppState) -> Result<bool> {
    if state.active_popup == Some(PopupType::HelpOverlay) {
        state.active_popup = None;
    } else {
        state.help_overlay_state.scroll_offset = 0;
        state.active_popup = Some(PopupType::HelpOverlay);
    }
    Ok(false)
}
