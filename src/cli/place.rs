//! `place` command: put a module on the grid.

use clap::Args;

use crate::cli::common::{require_grid, resolve_cell, CliError, CliResult, GlobalOptions};
use crate::models::{cell_label, ModuleKind, PhaseLabel, RgbColor, Selection};
use crate::services::Placement;

/// Place a breaker or RCD, overwriting anything in its way
#[derive(Debug, Clone, Args)]
pub struct PlaceArgs {
    /// Anchor cell, e.g. A1
    #[arg(long, value_name = "CELL")]
    pub cell: String,

    /// Module kind: 1, 2, 3 or rcd
    #[arg(long, value_name = "KIND")]
    pub kind: String,

    /// Background color as #RRGGBB (ignored for RCDs)
    #[arg(long, value_name = "HEX")]
    pub color: Option<String>,

    /// Phase label: L1, L2, L3 or N
    #[arg(long, value_name = "PHASE")]
    pub phase: Option<String>,

    /// Annotation text (\n for a line break)
    #[arg(long, value_name = "TEXT")]
    pub text: Option<String>,
}

impl PlaceArgs {
    /// Builds the selection from the arguments.
    fn selection(&self) -> CliResult<Selection> {
        let kind = self
            .kind
            .parse::<ModuleKind>()
            .map_err(|e| CliError::validation(e.to_string()))?;
        let mut selection = Selection::with_kind(kind);

        if let Some(color) = &self.color {
            let color = RgbColor::from_hex(color)
                .map_err(|e| CliError::validation(format!("Invalid --color: {e}")))?;
            selection = selection.color(color);
        }
        if let Some(phase) = &self.phase {
            let phase = phase
                .parse::<PhaseLabel>()
                .map_err(|e| CliError::validation(e.to_string()))?;
            selection = selection.phase(phase);
        }
        if let Some(text) = &self.text {
            selection = selection.text(text.replace("\\n", "\n"));
        }
        Ok(selection)
    }

    /// Execute the place command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let selection = self.selection()?;
        let mut editor = global.open_editor()?;
        let (row, col) = resolve_cell(&self.cell, require_grid(&editor)?)?;

        if let Placement::Placed { module, .. } = editor.activate(row, col, &selection)? {
            let last = module.anchor_column + module.width - 1;
            println!(
                "Placed {} at {}-{}",
                module.kind,
                cell_label(row, module.anchor_column),
                cell_label(row, last)
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(kind: &str) -> PlaceArgs {
        PlaceArgs {
            cell: "A1".to_string(),
            kind: kind.to_string(),
            color: Some("#ff9800".to_string()),
            phase: Some("l3".to_string()),
            text: Some("Oven\\nKitchen".to_string()),
        }
    }

    #[test]
    fn test_selection_from_args() {
        let selection = args("2").selection().unwrap();
        let expected = Selection::with_kind(ModuleKind::DoublePole)
            .color(RgbColor::new(0xFF, 0x98, 0x00))
            .phase(PhaseLabel::L3)
            .text("Oven\nKitchen");
        assert_eq!(selection, expected);
    }

    #[test]
    fn test_invalid_kind_is_validation_error() {
        let err = args("5").selection().unwrap_err();
        assert_eq!(err.code, crate::cli::ExitCode::ValidationError);
    }

    #[test]
    fn test_invalid_phase_is_validation_error() {
        let mut args = args("rcd");
        args.phase = Some("L4".to_string());
        let err = args.selection().unwrap_err();
        assert_eq!(err.code, crate::cli::ExitCode::ValidationError);
    }
}
