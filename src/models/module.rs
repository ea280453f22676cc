//! Breaker module data structures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::RgbColor;

/// Fixed background of residual-current devices.
pub const RCD_COLOR: RgbColor = RgbColor::new(0x21, 0x96, 0xF3);

/// Kind of breaker module.
///
/// Serialized the way the panel editor has always stored it: the pole count
/// as a string, or `"rcd"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ModuleKind {
    /// Single-pole breaker, one cell wide
    #[default]
    #[serde(rename = "1")]
    SinglePole,
    /// Double-pole breaker, two cells wide
    #[serde(rename = "2")]
    DoublePole,
    /// Triple-pole breaker, three cells wide
    #[serde(rename = "3")]
    TriplePole,
    /// Residual-current device, always one cell wide
    #[serde(rename = "rcd")]
    Rcd,
}

impl ModuleKind {
    /// All kinds in toolbar order.
    pub const ALL: [Self; 4] = [Self::SinglePole, Self::DoublePole, Self::TriplePole, Self::Rcd];

    /// Number of cells the module spans.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::SinglePole | Self::Rcd => 1,
            Self::DoublePole => 2,
            Self::TriplePole => 3,
        }
    }

    /// Label shown when the user left the annotation empty.
    #[must_use]
    pub fn default_label(self) -> String {
        match self {
            Self::Rcd => "RCD".to_string(),
            _ => format!("{}P breaker", self.width()),
        }
    }

    /// Short toolbar name.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::SinglePole => "1P",
            Self::DoublePole => "2P",
            Self::TriplePole => "3P",
            Self::Rcd => "RCD",
        }
    }

    /// Background forced by the kind, if any.
    #[must_use]
    pub const fn forced_color(self) -> Option<RgbColor> {
        match self {
            Self::Rcd => Some(RCD_COLOR),
            _ => None,
        }
    }
}

impl FromStr for ModuleKind {
    type Err = anyhow::Error;

    /// Accepts "1"/"2"/"3", "1p".."3p" and "rcd" (case-insensitive).
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "1p" => Ok(Self::SinglePole),
            "2" | "2p" => Ok(Self::DoublePole),
            "3" | "3p" => Ok(Self::TriplePole),
            "rcd" => Ok(Self::Rcd),
            other => anyhow::bail!("Unknown module kind '{other}'. Expected 1, 2, 3 or rcd"),
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.short_name())
    }
}

/// Phase marker shown as a badge on the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PhaseLabel {
    /// Phase 1
    #[default]
    L1,
    /// Phase 2
    L2,
    /// Phase 3
    L3,
    /// Neutral
    N,
}

impl PhaseLabel {
    /// All phases in selector order.
    pub const ALL: [Self; 4] = [Self::L1, Self::L2, Self::L3, Self::N];

    /// Badge text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L3 => "L3",
            Self::N => "N",
        }
    }

    /// Next phase, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl FromStr for PhaseLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L1" => Ok(Self::L1),
            "L2" => Ok(Self::L2),
            "L3" => Ok(Self::L3),
            "N" => Ok(Self::N),
            other => anyhow::bail!("Unknown phase '{other}'. Expected L1, L2, L3 or N"),
        }
    }
}

impl fmt::Display for PhaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A placed breaker or RCD occupying one or more contiguous cells of a row.
///
/// # Validation
///
/// - `width` is derived from `kind` (1-3)
/// - `anchor_column + width` never exceeds the grid's column count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Breaker kind
    #[serde(alias = "type")]
    pub kind: ModuleKind,
    /// Number of spanned cells
    pub width: usize,
    /// Background color
    pub color: RgbColor,
    /// Phase badge
    #[serde(default, alias = "phase")]
    pub phase_label: PhaseLabel,
    /// Free-form annotation, may be empty
    #[serde(default, alias = "text")]
    pub annotation_text: String,
    /// Leftmost spanned column (0-based)
    #[serde(alias = "startCol")]
    pub anchor_column: usize,
    /// Row index (0-based)
    pub row: usize,
}

impl Module {
    /// Text shown on the module: the annotation, or the kind's default label.
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.annotation_text.is_empty() {
            self.kind.default_label()
        } else {
            self.annotation_text.clone()
        }
    }

    /// Columns covered by this module.
    #[must_use]
    pub fn columns(&self) -> std::ops::Range<usize> {
        self.anchor_column..self.anchor_column + self.width
    }

    /// Whether the module covers `col`.
    #[must_use]
    pub fn spans(&self, col: usize) -> bool {
        self.columns().contains(&col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(kind: ModuleKind, text: &str) -> Module {
        Module {
            kind,
            width: kind.width(),
            color: RgbColor::WHITE,
            phase_label: PhaseLabel::L1,
            annotation_text: text.to_string(),
            anchor_column: 2,
            row: 0,
        }
    }

    #[test]
    fn test_kind_widths() {
        assert_eq!(ModuleKind::SinglePole.width(), 1);
        assert_eq!(ModuleKind::DoublePole.width(), 2);
        assert_eq!(ModuleKind::TriplePole.width(), 3);
        assert_eq!(ModuleKind::Rcd.width(), 1);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("2".parse::<ModuleKind>().unwrap(), ModuleKind::DoublePole);
        assert_eq!("3P".parse::<ModuleKind>().unwrap(), ModuleKind::TriplePole);
        assert_eq!("RCD".parse::<ModuleKind>().unwrap(), ModuleKind::Rcd);
        assert!("4".parse::<ModuleKind>().is_err());
    }

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(serde_json::to_string(&ModuleKind::Rcd).unwrap(), "\"rcd\"");
        assert_eq!(
            serde_json::from_str::<ModuleKind>("\"2\"").unwrap(),
            ModuleKind::DoublePole
        );
    }

    #[test]
    fn test_display_text_falls_back_to_default_label() {
        assert_eq!(module(ModuleKind::DoublePole, "").display_text(), "2P breaker");
        assert_eq!(module(ModuleKind::Rcd, "").display_text(), "RCD");
        assert_eq!(module(ModuleKind::SinglePole, "Kitchen").display_text(), "Kitchen");
    }

    #[test]
    fn test_spans() {
        let m = module(ModuleKind::TriplePole, "");
        assert!(!m.spans(1));
        assert!(m.spans(2));
        assert!(m.spans(4));
        assert!(!m.spans(5));
    }

    #[test]
    fn test_phase_cycle() {
        assert_eq!(PhaseLabel::L1.next(), PhaseLabel::L2);
        assert_eq!(PhaseLabel::N.next(), PhaseLabel::L1);
        assert_eq!("n".parse::<PhaseLabel>().unwrap(), PhaseLabel::N);
    }

    #[test]
    fn test_module_accepts_legacy_field_names() {
        let json = r##"{"type":"2","width":2,"color":"#ff0000","phase":"L3","text":"Oven","startCol":4,"row":1}"##;
        let m: Module = serde_json::from_str(json).unwrap();
        assert_eq!(m.kind, ModuleKind::DoublePole);
        assert_eq!(m.phase_label, PhaseLabel::L3);
        assert_eq!(m.annotation_text, "Oven");
        assert_eq!(m.anchor_column, 4);
    }
}
