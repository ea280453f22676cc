//! Export command for rendering the schema to PNG.

use crate::cli::common::{CliResult, GlobalOptions};
use crate::export::export_filename;
use clap::Args;
use std::path::PathBuf;

/// Export the schema as a PNG image
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Output path (defaults to [export_dir]/panel-schema-[date].png)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let config = global.config()?;
        let editor = global.open_editor()?;

        let output_path = self.get_output_path(&config.export_dir());
        editor.export_png(&output_path)?;

        println!("Exported schema to: {}", output_path.display());
        Ok(())
    }

    /// Get the output file path (either user-specified or auto-generated)
    fn get_output_path(&self, export_dir: &std::path::Path) -> PathBuf {
        if let Some(ref path) = self.output {
            return path.clone();
        }

        export_dir.join(export_filename(chrono::Local::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_output_path_default() {
        let args = ExportArgs { output: None };
        let path = args.get_output_path(std::path::Path::new("/exports"));

        let path_str = path.to_string_lossy();
        assert!(path_str.starts_with("/exports"));
        assert!(path_str.contains("panel-schema-"));
        assert!(path_str.ends_with(".png"));
    }

    #[test]
    fn test_get_output_path_custom() {
        let custom_path = PathBuf::from("/tmp/my_schema.png");
        let args = ExportArgs {
            output: Some(custom_path.clone()),
        };

        assert_eq!(args.get_output_path(std::path::Path::new(".")), custom_path);
    }
}
