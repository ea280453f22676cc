//! Popup input handlers.

use anyhow::Result;
use crossterm::event::{self, KeyCode};

use crate::models::RgbColor;
use crate::tui::text_input::{DimensionsEvent, InputPurpose, TextInputEvent};
use crate::tui::{ActiveComponent, AppState, Component, PopupType};

/// Route a key to the open popup.
pub fn handle_popup_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match state.active_popup {
        Some(PopupType::HelpOverlay) => handle_help_input(state, key),
        Some(PopupType::ConfirmClear) => handle_confirm_clear_input(state, key),
        Some(PopupType::TextInput) => handle_text_input(state, key),
        Some(PopupType::NewSchema) => handle_new_schema_input(state, key),
        None => Ok(false),
    }
}

/// Handle input for the help overlay
fn handle_help_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?' | 'q') => state.active_popup = None,
        KeyCode::Up | KeyCode::Char('k') => state.help_overlay_state.scroll_up(),
        KeyCode::Down | KeyCode::Char('j') => state.help_overlay_state.scroll_down(),
        _ => {}
    }
    Ok(false)
}

fn handle_confirm_clear_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y' | 'Y') => {
            state.active_popup = None;
            state.clear_schema();
        }
        KeyCode::Char('n' | 'N') | KeyCode::Esc => {
            state.active_popup = None;
            state.set_status("Schema kept");
        }
        _ => {}
    }
    Ok(false)
}

fn handle_text_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    let Some(ActiveComponent::TextInput(input)) = state.active_component.as_mut() else {
        state.close_component();
        return Ok(false);
    };
    let purpose = input.purpose();

    match input.handle_input(key) {
        Some(TextInputEvent::Confirmed(value)) => {
            state.close_component();
            match purpose {
                InputPurpose::Annotation => {
                    state.selection.text = value.replace("\\n", "\n");
                    if state.selection.text.is_empty() {
                        state.set_status("Text reset to the default label");
                    } else {
                        state.set_status("Text updated");
                    }
                }
                InputPurpose::CustomColor => match RgbColor::from_hex(&value) {
                    Ok(color) => {
                        state.selection.color = color;
                        state.set_status(format!("Color: {color}"));
                    }
                    Err(err) => state.set_error(format!("{err:#}")),
                },
            }
        }
        Some(TextInputEvent::Cancelled) => {
            state.close_component();
            state.set_status("Cancelled");
        }
        None => {}
    }
    Ok(false)
}

fn handle_new_schema_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    let Some(ActiveComponent::Dimensions(dialog)) = state.active_component.as_mut() else {
        state.close_component();
        return Ok(false);
    };

    match dialog.handle_input(key) {
        Some(DimensionsEvent::Confirmed { rows, cols }) => {
            state.close_component();
            state.create_schema(rows, cols);
        }
        Some(DimensionsEvent::Cancelled) => {
            state.close_component();
            state.set_status("Cancelled");
        }
        None => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ThemeMode};
    use crate::services::{MemoryStore, SchemaEditor};
    use crate::shortcuts::Action;
    use crate::tui::handlers::dispatch_action;
    use crate::tui::DynStore;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::layout::Rect;

    fn state() -> AppState {
        let mut config = Config::new();
        config.ui.theme_mode = ThemeMode::Dark;
        let store: DynStore = Box::new(MemoryStore::new());
        let editor = SchemaEditor::open(store).unwrap();
        let mut state = AppState::new(editor, config, 160);
        state.screen = Rect::new(0, 0, 160, 50);
        state
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_popup_input(state, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn type_str(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_new_schema_dialog_creates_grid() {
        let mut state = state();
        dispatch_action(&mut state, Action::NewSchema).unwrap();
        // Pre-filled with 3 x 10
        press(&mut state, KeyCode::Backspace);
        type_str(&mut state, "5");
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Backspace);
        press(&mut state, KeyCode::Backspace);
        type_str(&mut state, "99");
        press(&mut state, KeyCode::Enter);

        assert_eq!(state.active_popup, None);
        assert_eq!(state.editor.grid().unwrap().dimensions(), (5, 15));
        assert_eq!(state.grid_view.dimensions(), (5, 15));
    }

    #[test]
    fn test_new_schema_cancel_keeps_state() {
        let mut state = state();
        dispatch_action(&mut state, Action::NewSchema).unwrap();
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.active_popup, None);
        assert!(state.editor.grid().is_none());
    }

    #[test]
    fn test_annotation_accepts_escaped_newline() {
        let mut state = state();
        dispatch_action(&mut state, Action::EditText).unwrap();
        type_str(&mut state, "Oven\\nKitchen");
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.selection.text, "Oven\nKitchen");
        assert!(state.active_component.is_none());
    }

    #[test]
    fn test_custom_color_dialog() {
        let mut state = state();
        dispatch_action(&mut state, Action::CustomColor).unwrap();
        for _ in 0..7 {
            press(&mut state, KeyCode::Backspace);
        }
        type_str(&mut state, "zz");
        press(&mut state, KeyCode::Enter);
        // Invalid input keeps the dialog open
        assert_eq!(state.active_popup, Some(PopupType::TextInput));

        press(&mut state, KeyCode::Backspace);
        press(&mut state, KeyCode::Backspace);
        type_str(&mut state, "#00ff80");
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.active_popup, None);
        assert_eq!(state.selection.color, RgbColor::new(0x00, 0xFF, 0x80));
    }

    #[test]
    fn test_confirm_clear() {
        let mut state = state();
        state.create_schema(3, 10);
        state.activate(0, 0);

        dispatch_action(&mut state, Action::ClearSchema).unwrap();
        press(&mut state, KeyCode::Char('n'));
        assert!(state.editor.grid().is_some());

        dispatch_action(&mut state, Action::ClearSchema).unwrap();
        press(&mut state, KeyCode::Char('y'));
        assert!(state.editor.grid().is_none());
        assert!(state.grid_view.is_empty());
        assert_eq!(state.status_message, "Schema cleared");
    }

    #[test]
    fn test_help_scroll_and_close() {
        let mut state = state();
        dispatch_action(&mut state, Action::ToggleHelp).unwrap();
        press(&mut state, KeyCode::Down);
        assert_eq!(state.help_overlay_state.scroll_offset, 1);
        press(&mut state, KeyCode::Char('q'));
        assert_eq!(state.active_popup, None);
    }
}
