// Selection action handlers: tool, color, phase and annotation

use crate::models::{ModuleKind, Tool};
use crate::tui::text_input::{InputPurpose, TextInput};
use crate::tui::{ActiveComponent, AppState, PopupType};
use anyhow::Result;

/// Select the next tool
pub fn handle_cycle_tool(state: &mut AppState) -> Result<bool> {
    state.selection.cycle_tool();
    state.set_status(format!("Tool: {}", state.selection.tool.label()));
    Ok(false)
}

/// Select a module kind
pub fn handle_select_kind(state: &mut AppState, kind: ModuleKind) -> Result<bool> {
    state.selection.tool = Tool::Place(kind);
    state.set_status(format!("Tool: {}", kind.default_label()));
    Ok(false)
}

/// Select the eraser
pub fn handle_select_eraser(state: &mut AppState) -> Result<bool> {
    state.selection.tool = Tool::Clear;
    state.set_status("Tool: Erase");
    Ok(false)
}

/// Select the next preset color
pub fn handle_cycle_color(state: &mut AppState) -> Result<bool> {
    state.selection.cycle_color();
    state.set_status(format!("Color: {}", state.selection.color));
    Ok(false)
}

/// Open the custom color dialog
pub fn handle_custom_color(state: &mut AppState) -> Result<bool> {
    let input = TextInput::new(InputPurpose::CustomColor, state.selection.color.to_hex());
    state.open_component(PopupType::TextInput, ActiveComponent::TextInput(input));
    Ok(false)
}

/// Select the next phase label
pub fn handle_cycle_phase(state: &mut AppState) -> Result<bool> {
    state.selection.phase = state.selection.phase.next();
    state.set_status(format!("Phase: {}", state.selection.phase));
    Ok(false)
}

/// Open the annotation dialog
pub fn handle_edit_text(state: &mut AppState) -> Result<bool> {
    let initial = state.selection.text.replace('\n', "\\n");
    let input = TextInput::new(InputPurpose::Annotation, initial);
    state.open_component(PopupType::TextInput, ActiveComponent::TextInput(input));
    Ok(false)
}
