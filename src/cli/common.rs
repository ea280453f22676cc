//! Shared types for CLI commands: errors, exit codes and schema access.

use std::fmt;
use std::path::PathBuf;

use crate::config::Config;
use crate::export::RasterError;
use crate::models::{parse_cell_label, GridState};
use crate::services::{EditorError, FileStore, PersistenceError, SchemaEditor};

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or a rejected operation
    ValidationError = 1,
    /// File system or encoding failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands, carrying its exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub code: ExitCode,
    /// Human-readable message
    pub message: String,
}

impl CliError {
    /// User input or domain rule violation (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// Environment failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<EditorError> for CliError {
    fn from(err: EditorError) -> Self {
        if err.is_user_error() {
            Self::validation(err.to_string())
        } else {
            Self::io(err.to_string())
        }
    }
}

impl From<PersistenceError> for CliError {
    fn from(err: PersistenceError) -> Self {
        Self::io(err.to_string())
    }
}

impl From<RasterError> for CliError {
    fn from(err: RasterError) -> Self {
        EditorError::from(err).into()
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Global options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Overrides the schema storage directory
    pub storage_dir: Option<PathBuf>,
}

impl GlobalOptions {
    /// Loads the configuration with the storage override applied.
    pub fn config(&self) -> CliResult<Config> {
        let mut config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;
        if let Some(dir) = &self.storage_dir {
            config.paths.storage_dir = Some(dir.clone());
        }
        Ok(config)
    }

    /// Opens the schema editor on the configured storage directory.
    pub fn open_editor(&self) -> CliResult<SchemaEditor<FileStore>> {
        let dir = self
            .config()?
            .storage_dir()
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        Ok(SchemaEditor::open(FileStore::new(dir))?)
    }
}

/// Parses a cell label like `B3` and checks it against the grid.
pub fn resolve_cell(label: &str, grid: &GridState) -> CliResult<(usize, usize)> {
    let (row, col) = parse_cell_label(label).ok_or_else(|| {
        CliError::validation(format!("Invalid cell '{label}'. Expected a label like A1"))
    })?;
    if !grid.contains(row, col) {
        let (rows, cols) = grid.dimensions();
        return Err(CliError::validation(format!(
            "Cell {label} is outside the {rows}x{cols} grid"
        )));
    }
    Ok((row, col))
}

/// Existing grid or a "no schema" validation error.
pub fn require_grid(editor: &SchemaEditor<FileStore>) -> CliResult<&GridState> {
    editor
        .grid()
        .ok_or_else(|| EditorError::NoSchema.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GridDimensions;
    use crate::services::PlacementError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::ValidationError.code(), 1);
        assert_eq!(ExitCode::IoError.code(), 2);
    }

    #[test]
    fn test_editor_error_mapping() {
        let err: CliError = EditorError::Placement(PlacementError::OutOfBounds {
            row: 0,
            col: 9,
            width: 2,
            rows: 3,
            cols: 10,
        })
        .into();
        assert_eq!(err.code, ExitCode::ValidationError);

        let err: CliError = RasterError::Empty.into();
        assert_eq!(err.code, ExitCode::ValidationError);

        let err: CliError = RasterError::Encode("boom".to_string()).into();
        assert_eq!(err.code, ExitCode::IoError);
    }

    #[test]
    fn test_resolve_cell() {
        let grid = GridState::new(GridDimensions::clamped(3, 10));
        assert_eq!(resolve_cell("b4", &grid).unwrap(), (1, 3));
        assert_eq!(
            resolve_cell("D1", &grid).unwrap_err().code,
            ExitCode::ValidationError
        );
        assert!(resolve_cell("??", &grid).is_err());
    }
}
