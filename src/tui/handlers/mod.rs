//! Key routing for the main view and its popups.

pub mod action_handlers;
pub mod actions;
pub mod popups;

use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::shortcuts::ShortcutRegistry;
use crate::tui::AppState;

pub use actions::dispatch_action;
pub use popups::handle_popup_input;

/// Context name of the grid editor bindings.
pub const MAIN_CONTEXT: &str = "main";

/// Resolves `key` against the grid editor bindings and runs the action.
///
/// Unbound keys are ignored. Returns `Ok(true)` when the editor should quit.
pub fn handle_main_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    match ShortcutRegistry::new().lookup(MAIN_CONTEXT, key) {
        Some(action) => dispatch_action(state, action),
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ThemeMode};
    use crate::services::{MemoryStore, SchemaEditor};
    use crate::tui::{DynStore, PopupType};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn state() -> AppState {
        let mut config = Config::new();
        config.ui.theme_mode = ThemeMode::Dark;
        let store: DynStore = Box::new(MemoryStore::new());
        AppState::new(SchemaEditor::open(store).unwrap(), config, 160)
    }

    #[test]
    fn test_bound_keys_dispatch() {
        let mut state = state();
        let help = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert!(!handle_main_input(&mut state, help).unwrap());
        assert_eq!(state.active_popup, Some(PopupType::HelpOverlay));

        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(handle_main_input(&mut state, quit).unwrap());
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut state = state();
        let before = state.status_message.clone();
        let key = KeyEvent::new(KeyCode::F(9), KeyModifiers::NONE);
        assert!(!handle_main_input(&mut state, key).unwrap());
        assert_eq!(state.status_message, before);
        assert!(state.active_popup.is_none());
    }
}
