//! `erase` command: remove the module covering a cell.

use clap::Args;

use crate::cli::common::{require_grid, resolve_cell, CliResult, GlobalOptions};
use crate::models::cell_label;

/// Remove the module covering a cell
#[derive(Debug, Clone, Args)]
pub struct EraseArgs {
    /// Any cell covered by the module, e.g. B3
    #[arg(long, value_name = "CELL")]
    pub cell: String,
}

impl EraseArgs {
    /// Execute the erase command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let mut editor = global.open_editor()?;
        let (row, col) = resolve_cell(&self.cell, require_grid(&editor)?)?;

        match editor.clear_cell(row, col)? {
            Some(span) => println!(
                "Erased {}-{}",
                cell_label(span.row, span.columns.start),
                cell_label(span.row, span.columns.end - 1)
            ),
            None => println!("Cell {} is already empty", cell_label(row, col)),
        }
        Ok(())
    }
}
