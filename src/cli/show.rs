//! `show` command: print the schema as a table or as its raw snapshot.

use std::fmt::Write;

use clap::Args;

use crate::cli::common::{require_grid, CliError, CliResult, GlobalOptions};
use crate::models::{cell_label, row_label, GridState};
use crate::services::persistence;

/// Print the current schema
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Print the saved JSON snapshot instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let editor = global.open_editor()?;
        let grid = require_grid(&editor)?;

        if self.json {
            let snapshot = persistence::encode(grid)?;
            let value: serde_json::Value = serde_json::from_str(&snapshot)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&value)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            print!("{}", render_table(grid));
        }
        Ok(())
    }
}

/// Plain-text view: one line per row, then one line per module.
///
/// Cells show `.` when empty, the kind at an anchor and `=` for the rest of
/// a wide module.
fn render_table(grid: &GridState) -> String {
    let (rows, cols) = grid.dimensions();
    let mut out = String::new();

    let _ = write!(out, "   ");
    for c in 0..cols {
        let _ = write!(out, "{:>4}", c + 1);
    }
    out.push('\n');

    for r in 0..rows {
        let _ = write!(out, "{:<3}", row_label(r));
        for c in 0..cols {
            let cell = match grid.get(r, c) {
                None => ".",
                Some(m) if m.anchor_column == c => m.kind.short_name(),
                Some(_) => "=",
            };
            let _ = write!(out, "{cell:>4}");
        }
        out.push('\n');
    }

    if grid.is_empty() {
        out.push_str("\nNo modules placed\n");
        return out;
    }

    out.push('\n');
    for m in grid.modules() {
        let span = format!(
            "{}-{}",
            cell_label(m.row, m.anchor_column),
            cell_label(m.row, m.anchor_column + m.width - 1)
        );
        let _ = writeln!(
            out,
            "{span:<8} {:<4} {:<3} {}  {}",
            m.kind.short_name(),
            m.phase_label,
            m.color,
            m.display_text().replace('\n', " / ")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GridDimensions, ModuleKind, PhaseLabel, Selection};
    use crate::services::placement::place;

    #[test]
    fn test_render_table() {
        let mut grid = GridState::new(GridDimensions::clamped(2, 4));
        place(
            &mut grid,
            0,
            1,
            &Selection::with_kind(ModuleKind::DoublePole)
                .phase(PhaseLabel::L2)
                .text("Oven"),
        )
        .unwrap();

        let table = render_table(&grid);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "      1   2   3   4");
        assert_eq!(lines[1], "A     .  2P   =   .");
        assert_eq!(lines[2], "B     .   .   .   .");
        assert!(lines[4].starts_with("A2-A3    2P   L2  #FFFFFF  Oven"));
    }

    #[test]
    fn test_render_empty_table() {
        let grid = GridState::new(GridDimensions::clamped(1, 2));
        assert!(render_table(&grid).contains("No modules placed"));
    }
}
