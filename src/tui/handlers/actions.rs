//! Action dispatch for the main editor view.

use anyhow::Result;

use crate::shortcuts::Action;
use crate::tui::AppState;

use super::action_handlers::{grid, navigation, popups, schema, selection};

/// Dispatch an action to its handler.
///
/// Returns `Ok(true)` when the application should quit.
pub fn dispatch_action(state: &mut AppState, action: Action) -> Result<bool> {
    match action {
        // Navigation
        Action::NavigateUp => navigation::handle_navigate_up(state),
        Action::NavigateDown => navigation::handle_navigate_down(state),
        Action::NavigateLeft => navigation::handle_navigate_left(state),
        Action::NavigateRight => navigation::handle_navigate_right(state),
        Action::JumpToFirst => navigation::handle_jump_to_first(state),
        Action::JumpToLast => navigation::handle_jump_to_last(state),

        // Grid
        Action::Activate => grid::handle_activate(state),
        Action::EraseCell => grid::handle_erase_cell(state),

        // Selection
        Action::CycleTool => selection::handle_cycle_tool(state),
        Action::SelectKind(kind) => selection::handle_select_kind(state, kind),
        Action::SelectEraser => selection::handle_select_eraser(state),
        Action::CycleColor => selection::handle_cycle_color(state),
        Action::CustomColor => selection::handle_custom_color(state),
        Action::CyclePhase => selection::handle_cycle_phase(state),
        Action::EditText => selection::handle_edit_text(state),

        // Schema
        Action::NewSchema => schema::handle_new_schema(state),
        Action::ClearSchema => schema::handle_clear_schema(state),
        Action::Export => schema::handle_export(state),

        // General
        Action::ToggleHelp => popups::handle_toggle_help(state),
        Action::Quit => schema::handle_quit(state),
        Action::Cancel => {
            state.set_status("");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ThemeMode};
    use crate::models::{ModuleKind, PhaseLabel, RgbColor, Tool};
    use crate::services::{MemoryStore, SchemaEditor};
    use crate::tui::{ActiveComponent, DynStore, PopupType};
    use ratatui::layout::Rect;

    fn state_with_grid() -> AppState {
        let mut config = Config::new();
        config.ui.theme_mode = ThemeMode::Dark;
        let store: DynStore = Box::new(MemoryStore::new());
        let editor = SchemaEditor::open(store).unwrap();
        let mut state = AppState::new(editor, config, 160);
        state.screen = Rect::new(0, 0, 160, 50);
        state.create_schema(3, 10);
        state
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut state = state_with_grid();
        dispatch_action(&mut state, Action::NavigateUp).unwrap();
        dispatch_action(&mut state, Action::NavigateLeft).unwrap();
        assert_eq!(state.cursor, (0, 0));

        for _ in 0..20 {
            dispatch_action(&mut state, Action::NavigateDown).unwrap();
            dispatch_action(&mut state, Action::NavigateRight).unwrap();
        }
        assert_eq!(state.cursor, (2, 9));

        dispatch_action(&mut state, Action::JumpToFirst).unwrap();
        assert_eq!(state.cursor, (2, 0));
        dispatch_action(&mut state, Action::JumpToLast).unwrap();
        assert_eq!(state.cursor, (2, 9));
    }

    #[test]
    fn test_activate_places_selected_kind() {
        let mut state = state_with_grid();
        dispatch_action(&mut state, Action::SelectKind(ModuleKind::TriplePole)).unwrap();
        dispatch_action(&mut state, Action::Activate).unwrap();

        let grid = state.editor.grid().unwrap();
        let module = grid.get(0, 2).unwrap();
        assert_eq!(module.kind, ModuleKind::TriplePole);
        assert_eq!(module.anchor_column, 0);

        dispatch_action(&mut state, Action::EraseCell).unwrap();
        assert!(state.editor.grid().unwrap().is_empty());
    }

    #[test]
    fn test_eraser_tool_clears_on_activate() {
        let mut state = state_with_grid();
        dispatch_action(&mut state, Action::Activate).unwrap();
        dispatch_action(&mut state, Action::SelectEraser).unwrap();
        assert_eq!(state.selection.tool, Tool::Clear);
        dispatch_action(&mut state, Action::Activate).unwrap();
        assert!(state.editor.grid().unwrap().is_empty());
    }

    #[test]
    fn test_selection_cycles() {
        let mut state = state_with_grid();
        let before = state.selection.clone();
        dispatch_action(&mut state, Action::CycleTool).unwrap();
        dispatch_action(&mut state, Action::CycleColor).unwrap();
        dispatch_action(&mut state, Action::CyclePhase).unwrap();
        assert_ne!(state.selection.tool, before.tool);
        assert_ne!(state.selection.color, before.color);
        assert_eq!(state.selection.phase, PhaseLabel::L2);
    }

    #[test]
    fn test_dialog_actions_open_popups() {
        let mut state = state_with_grid();
        dispatch_action(&mut state, Action::EditText).unwrap();
        assert_eq!(state.active_popup, Some(PopupType::TextInput));
        assert!(matches!(
            state.active_component,
            Some(ActiveComponent::TextInput(_))
        ));
        state.close_component();

        dispatch_action(&mut state, Action::NewSchema).unwrap();
        assert_eq!(state.active_popup, Some(PopupType::NewSchema));
        state.close_component();

        dispatch_action(&mut state, Action::ClearSchema).unwrap();
        assert_eq!(state.active_popup, Some(PopupType::ConfirmClear));
    }

    #[test]
    fn test_custom_color_prefills_hex() {
        let mut state = state_with_grid();
        state.selection.color = RgbColor::new(0xAB, 0xCD, 0xEF);
        dispatch_action(&mut state, Action::CustomColor).unwrap();
        match &state.active_component {
            Some(ActiveComponent::TextInput(input)) => assert_eq!(input.value(), "#ABCDEF"),
            other => panic!("unexpected component: {other:?}"),
        }
    }

    #[test]
    fn test_quit_and_help() {
        let mut state = state_with_grid();
        dispatch_action(&mut state, Action::ToggleHelp).unwrap();
        assert_eq!(state.active_popup, Some(PopupType::HelpOverlay));
        dispatch_action(&mut state, Action::ToggleHelp).unwrap();
        assert_eq!(state.active_popup, None);

        assert!(dispatch_action(&mut state, Action::Quit).unwrap());
        assert!(state.should_quit);
    }
}
