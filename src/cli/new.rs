//! `new` command: replace the saved schema with an empty grid.

use clap::Args;

use crate::cli::common::{CliResult, GlobalOptions};

/// Create an empty schema (replaces any existing one)
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Number of rows (1-8, default from config)
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// Number of columns (1-15, default from config)
    #[arg(long, value_name = "N")]
    pub cols: Option<usize>,
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let defaults = global.config()?.default_dimensions();
        let rows = self.rows.unwrap_or(defaults.rows);
        let cols = self.cols.unwrap_or(defaults.cols);

        let mut editor = global.open_editor()?;
        let dims = editor.create(rows, cols)?;

        if (dims.rows, dims.cols) != (rows, cols) {
            println!("Requested {rows}x{cols}, clamped to supported range.");
        }
        println!("Created {}x{} schema", dims.rows, dims.cols);
        Ok(())
    }
}
