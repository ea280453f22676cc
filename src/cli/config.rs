//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::{CompactCells, Config, ThemeMode};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Directory the schema is saved in
    #[arg(long, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// Directory PNG exports are written to
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Compact cells (auto, always, or never)
    #[arg(long, value_name = "MODE")]
    compact: Option<String>,

    /// Default row count for new schemas
    #[arg(long, value_name = "N")]
    rows: Option<usize>,

    /// Default column count for new schemas
    #[arg(long, value_name = "N")]
    cols: Option<usize>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    paths: PathsOutput,
    ui: UiOutput,
    defaults: DefaultsOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    storage_dir: String,
    export_dir: String,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
    compact_cells: String,
}

#[derive(Serialize, Debug)]
struct DefaultsOutput {
    rows: usize,
    cols: usize,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;
        let output = ConfigOutput::from_config(&config)?;

        if self.json {
            let json = serde_json::to_string_pretty(&output).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?;
            println!("{json}");
        } else {
            output.print_human_readable();
        }

        Ok(())
    }
}

fn parse_theme(value: &str) -> CliResult<ThemeMode> {
    match value.to_lowercase().as_str() {
        "auto" => Ok(ThemeMode::Auto),
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        _ => Err(CliError::validation(
            "Invalid theme mode. Must be 'auto', 'light', or 'dark'",
        )),
    }
}

fn parse_compact(value: &str) -> CliResult<CompactCells> {
    match value.to_lowercase().as_str() {
        "auto" => Ok(CompactCells::Auto),
        "always" => Ok(CompactCells::Always),
        "never" => Ok(CompactCells::Never),
        _ => Err(CliError::validation(
            "Invalid compact mode. Must be 'auto', 'always', or 'never'",
        )),
    }
}

impl ConfigSetArgs {
    const fn is_empty(&self) -> bool {
        self.storage_dir.is_none()
            && self.export_dir.is_none()
            && self.theme.is_none()
            && self.compact.is_none()
            && self.rows.is_none()
            && self.cols.is_none()
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --storage-dir, --export-dir, --theme, --compact, --rows or --cols",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(path) = &self.storage_dir {
            config.paths.storage_dir = Some(path.clone());
        }
        if let Some(path) = &self.export_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create export directory {}: {e}",
                    path.display()
                ))
            })?;
            config.paths.export_dir = Some(path.clone());
        }
        if let Some(theme) = &self.theme {
            config.ui.theme_mode = parse_theme(theme)?;
        }
        if let Some(compact) = &self.compact {
            config.ui.compact_cells = parse_compact(compact)?;
        }
        if let Some(rows) = self.rows {
            config.defaults.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.defaults.cols = cols;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(e.to_string()))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}

impl ConfigOutput {
    fn from_config(config: &Config) -> CliResult<Self> {
        let storage_dir = config
            .storage_dir()
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        Ok(Self {
            paths: PathsOutput {
                storage_dir: storage_dir.to_string_lossy().to_string(),
                export_dir: config.export_dir().to_string_lossy().to_string(),
            },
            ui: UiOutput {
                theme: format!("{:?}", config.ui.theme_mode).to_lowercase(),
                compact_cells: format!("{:?}", config.ui.compact_cells).to_lowercase(),
            },
            defaults: DefaultsOutput {
                rows: config.defaults.rows,
                cols: config.defaults.cols,
            },
        })
    }

    fn print_human_readable(&self) {
        println!("LazyPanel Configuration");
        println!("=======================");
        println!();

        println!("Paths:");
        println!("  Storage Directory: {}", self.paths.storage_dir);
        println!("  Export Directory: {}", self.paths.export_dir);
        println!();

        println!("UI:");
        println!("  Theme Mode: {}", self.ui.theme);
        println!("  Compact Cells: {}", self.ui.compact_cells);
        println!();

        println!("Defaults:");
        println!("  Grid: {} rows x {} columns", self.defaults.rows, self.defaults.cols);
    }
}
