//! Centralized shortcut and action system.
//!
//! Key bindings, their help text and the action they trigger all live here,
//! so the help overlay and the event handlers cannot drift apart.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::models::ModuleKind;

/// Every action the editor can perform from the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // === NAVIGATION ===
    NavigateUp,
    NavigateDown,
    NavigateLeft,
    NavigateRight,
    JumpToFirst,
    JumpToLast,

    // === GRID ===
    /// Apply the active tool at the cursor
    Activate,
    /// Remove the module under the cursor regardless of tool
    EraseCell,

    // === SELECTION ===
    CycleTool,
    SelectKind(ModuleKind),
    SelectEraser,
    CycleColor,
    CustomColor,
    CyclePhase,
    EditText,

    // === SCHEMA ===
    NewSchema,
    ClearSchema,
    Export,

    // === GENERAL ===
    ToggleHelp,
    Quit,
    Cancel,
}

impl Action {
    /// Short description used in the help overlay and status hints.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NavigateUp => "Move up",
            Self::NavigateDown => "Move down",
            Self::NavigateLeft => "Move left",
            Self::NavigateRight => "Move right",
            Self::JumpToFirst => "First column",
            Self::JumpToLast => "Last column",

            Self::Activate => "Place / erase",
            Self::EraseCell => "Erase module",

            Self::CycleTool => "Next tool",
            Self::SelectKind(ModuleKind::SinglePole) => "1-pole breaker",
            Self::SelectKind(ModuleKind::DoublePole) => "2-pole breaker",
            Self::SelectKind(ModuleKind::TriplePole) => "3-pole breaker",
            Self::SelectKind(ModuleKind::Rcd) => "RCD",
            Self::SelectEraser => "Eraser tool",
            Self::CycleColor => "Next color",
            Self::CustomColor => "Custom color",
            Self::CyclePhase => "Next phase",
            Self::EditText => "Edit text",

            Self::NewSchema => "New schema",
            Self::ClearSchema => "Clear schema",
            Self::Export => "Export PNG",

            Self::ToggleHelp => "Help",
            Self::Quit => "Quit",
            Self::Cancel => "Cancel",
        }
    }
}

/// Key labels and actions shown by the help overlay, in display order.
pub const HELP_ENTRIES: &[(&str, Action)] = &[
    ("←↓↑→ / hjkl", Action::NavigateLeft),
    ("Home / End", Action::JumpToFirst),
    ("Enter / Space", Action::Activate),
    ("x / Del", Action::EraseCell),
    ("Tab", Action::CycleTool),
    ("1", Action::SelectKind(ModuleKind::SinglePole)),
    ("2", Action::SelectKind(ModuleKind::DoublePole)),
    ("3", Action::SelectKind(ModuleKind::TriplePole)),
    ("r", Action::SelectKind(ModuleKind::Rcd)),
    ("e", Action::SelectEraser),
    ("c", Action::CycleColor),
    ("Shift+C", Action::CustomColor),
    ("p", Action::CyclePhase),
    ("t", Action::EditText),
    ("n", Action::NewSchema),
    ("Shift+X", Action::ClearSchema),
    ("Ctrl+E", Action::Export),
    ("?", Action::ToggleHelp),
    ("q / Ctrl+Q", Action::Quit),
];

/// Hints shown in the status bar when nothing else is displayed.
pub const STATUS_HINTS: &[(&str, Action)] = &[
    ("Enter", Action::Activate),
    ("Tab", Action::CycleTool),
    ("c", Action::CycleColor),
    ("t", Action::EditText),
    ("Ctrl+E", Action::Export),
];

/// Maps key events to actions for a given context.
pub struct ShortcutRegistry {
    bindings: HashMap<(String, KeyBinding), Action>,
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key binding from a KeyEvent.
    #[must_use]
    pub const fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

impl ShortcutRegistry {
    /// Create a new shortcut registry with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
        };

        registry.register_main_shortcuts();
        registry
    }

    fn register_main_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = "main";

        // === NAVIGATION ===
        self.register(ctx, K::Up, M::NONE, Action::NavigateUp);
        self.register(ctx, K::Down, M::NONE, Action::NavigateDown);
        self.register(ctx, K::Left, M::NONE, Action::NavigateLeft);
        self.register(ctx, K::Right, M::NONE, Action::NavigateRight);
        self.register(ctx, K::Char('k'), M::NONE, Action::NavigateUp);
        self.register(ctx, K::Char('j'), M::NONE, Action::NavigateDown);
        self.register(ctx, K::Char('h'), M::NONE, Action::NavigateLeft);
        self.register(ctx, K::Char('l'), M::NONE, Action::NavigateRight);
        self.register(ctx, K::Home, M::NONE, Action::JumpToFirst);
        self.register(ctx, K::End, M::NONE, Action::JumpToLast);

        // === GRID ===
        self.register(ctx, K::Enter, M::NONE, Action::Activate);
        self.register(ctx, K::Char(' '), M::NONE, Action::Activate);
        self.register(ctx, K::Char('x'), M::NONE, Action::EraseCell);
        self.register(ctx, K::Delete, M::NONE, Action::EraseCell);

        // === SELECTION ===
        self.register(ctx, K::Tab, M::NONE, Action::CycleTool);
        for kind in ModuleKind::ALL {
            let key = match kind {
                ModuleKind::SinglePole => '1',
                ModuleKind::DoublePole => '2',
                ModuleKind::TriplePole => '3',
                ModuleKind::Rcd => 'r',
            };
            self.register(ctx, K::Char(key), M::NONE, Action::SelectKind(kind));
        }
        self.register(ctx, K::Char('e'), M::NONE, Action::SelectEraser);
        self.register(ctx, K::Char('c'), M::NONE, Action::CycleColor);
        self.register(ctx, K::Char('C'), M::SHIFT, Action::CustomColor);
        self.register(ctx, K::Char('p'), M::NONE, Action::CyclePhase);
        self.register(ctx, K::Char('t'), M::NONE, Action::EditText);

        // === SCHEMA ===
        self.register(ctx, K::Char('n'), M::NONE, Action::NewSchema);
        self.register(ctx, K::Char('X'), M::SHIFT, Action::ClearSchema);
        self.register(ctx, K::Char('e'), M::CONTROL, Action::Export);

        // === GENERAL ===
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);
        // Most terminals report '?' with SHIFT held
        self.register(ctx, K::Char('?'), M::SHIFT, Action::ToggleHelp);
        self.register(ctx, K::Char('q'), M::NONE, Action::Quit);
        self.register(ctx, K::Char('q'), M::CONTROL, Action::Quit);
        self.register(ctx, K::Esc, M::NONE, Action::Cancel);
    }

    /// Register a shortcut binding.
    fn register(&mut self, context: &str, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context.to_string(), binding), action);
    }

    /// Look up an action for a given context and key event.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.bindings.get(&(context.to_string(), binding)).copied()
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
