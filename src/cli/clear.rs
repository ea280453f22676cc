//! `clear` command: delete the whole schema.

use clap::Args;

use crate::cli::common::{CliResult, GlobalOptions};

/// Delete the schema and its saved snapshot
#[derive(Debug, Clone, Args)]
pub struct ClearArgs {}

impl ClearArgs {
    /// Execute the clear command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let mut editor = global.open_editor()?;
        editor.clear_schema()?;
        println!("Schema cleared");
        Ok(())
    }
}
