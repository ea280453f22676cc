//! Selection state: the tool, color, phase and text applied to the next placement.

use crate::models::{ModuleKind, PhaseLabel, RgbColor};

/// Preset background colors offered by the editor's color selector.
pub const PRESET_COLORS: [(&str, RgbColor); 8] = [
    ("White", RgbColor::new(0xFF, 0xFF, 0xFF)),
    ("Light gray", RgbColor::new(0xE0, 0xE0, 0xE0)),
    ("Yellow", RgbColor::new(0xFF, 0xEB, 0x3B)),
    ("Orange", RgbColor::new(0xFF, 0x98, 0x00)),
    ("Red", RgbColor::new(0xF4, 0x43, 0x36)),
    ("Green", RgbColor::new(0x4C, 0xAF, 0x50)),
    ("Purple", RgbColor::new(0x9C, 0x27, 0xB0)),
    ("Black", RgbColor::new(0x21, 0x21, 0x21)),
];

/// What a click on a cell does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Place a module of the given kind
    Place(ModuleKind),
    /// Remove the module under the cursor, placing nothing
    Clear,
}

impl Tool {
    /// All tools in toolbar order.
    pub const ALL: [Self; 5] = [
        Self::Place(ModuleKind::SinglePole),
        Self::Place(ModuleKind::DoublePole),
        Self::Place(ModuleKind::TriplePole),
        Self::Place(ModuleKind::Rcd),
        Self::Clear,
    ];

    /// Toolbar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Place(kind) => kind.short_name(),
            Self::Clear => "Erase",
        }
    }
}

impl Default for Tool {
    fn default() -> Self {
        Self::Place(ModuleKind::SinglePole)
    }
}

/// Everything the next placement needs, passed explicitly to the placement engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// Active tool
    pub tool: Tool,
    /// Background for placed modules (ignored for RCDs)
    pub color: RgbColor,
    /// Phase badge
    pub phase: PhaseLabel,
    /// Annotation; empty means "use the kind's default label"
    pub text: String,
}

impl Selection {
    /// Selection placing `kind` with default color, phase and text.
    #[must_use]
    pub fn with_kind(kind: ModuleKind) -> Self {
        Self {
            tool: Tool::Place(kind),
            ..Self::default()
        }
    }

    /// Sets the color.
    #[must_use]
    pub const fn color(mut self, color: RgbColor) -> Self {
        self.color = color;
        self
    }

    /// Sets the phase.
    #[must_use]
    pub const fn phase(mut self, phase: PhaseLabel) -> Self {
        self.phase = phase;
        self
    }

    /// Sets the annotation text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Selects the next tool, wrapping around.
    pub fn cycle_tool(&mut self) {
        let idx = Tool::ALL.iter().position(|t| *t == self.tool).unwrap_or(0);
        self.tool = Tool::ALL[(idx + 1) % Tool::ALL.len()];
    }

    /// Selects the next preset color, wrapping around. Custom colors restart at the first preset.
    pub fn cycle_color(&mut self) {
        let next = PRESET_COLORS
            .iter()
            .position(|(_, c)| *c == self.color)
            .map_or(0, |idx| (idx + 1) % PRESET_COLORS.len());
        self.color = PRESET_COLORS[next].1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let selection = Selection::default();
        assert_eq!(selection.tool, Tool::Place(ModuleKind::SinglePole));
        assert_eq!(selection.color, RgbColor::WHITE);
        assert_eq!(selection.phase, PhaseLabel::L1);
        assert!(selection.text.is_empty());
    }

    #[test]
    fn test_cycle_tool_wraps() {
        let mut selection = Selection::default();
        for _ in 0..Tool::ALL.len() - 1 {
            selection.cycle_tool();
        }
        assert_eq!(selection.tool, Tool::Clear);
        selection.cycle_tool();
        assert_eq!(selection.tool, Tool::Place(ModuleKind::SinglePole));
    }

    #[test]
    fn test_cycle_color_from_custom_starts_at_first_preset() {
        let mut selection = Selection::default().color(RgbColor::new(1, 2, 3));
        selection.cycle_color();
        assert_eq!(selection.color, PRESET_COLORS[0].1);
        selection.cycle_color();
        assert_eq!(selection.color, PRESET_COLORS[1].1);
    }
}
