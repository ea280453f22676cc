//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::branding::APP_DATA_DIR;
use crate::models::{GridDimensions, MAX_COLS, MAX_ROWS};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "LAZYPANEL_CONFIG_DIR";

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// When the grid is drawn with narrow cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CompactCells {
    /// Narrow cells when the terminal is narrower than 100 columns
    #[default]
    Auto,
    /// Always narrow
    Always,
    /// Never narrow
    Never,
}

impl CompactCells {
    /// Terminal width below which `Auto` switches to compact cells.
    pub const AUTO_THRESHOLD: u16 = 100;

    /// Whether cells should be compact for a terminal `width` columns wide.
    #[must_use]
    pub const fn is_compact(self, width: u16) -> bool {
        match self {
            Self::Auto => width < Self::AUTO_THRESHOLD,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding the saved schema (default: platform data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    /// Directory PNG exports are written to (default: current directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Cell width policy
    #[serde(default)]
    pub compact_cells: CompactCells,
}

/// Values pre-filled in the new-schema dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Row count
    pub rows: usize,
    /// Column count
    pub cols: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let dims = GridDimensions::default();
        Self {
            rows: dims.rows,
            cols: dims.cols,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/LazyPanel/config.toml`
/// - macOS: `~/Library/Application Support/LazyPanel/config.toml`
/// - Windows: `%APPDATA%\LazyPanel\config.toml`
///
/// # Validation
///
/// - `defaults.rows` must be within 1-8
/// - `defaults.cols` must be within 1-15
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
    /// New-schema defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/LazyPanel/`
    /// - macOS: `~/Library/Application Support/LazyPanel/`
    /// - Windows: `%APPDATA%\LazyPanel\`
    ///
    /// `LAZYPANEL_CONFIG_DIR` overrides the location.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Default schema storage directory, `<data_dir>/LazyPanel/storage`.
    pub fn default_storage_dir() -> Result<PathBuf> {
        Ok(dirs::data_dir()
            .context("Failed to determine data directory")?
            .join(APP_DATA_DIR)
            .join("storage"))
    }

    /// Resolved schema storage directory.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        match &self.paths.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_storage_dir(),
        }
    }

    /// Resolved export directory.
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.paths
            .export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// New-schema defaults as clamped dimensions.
    #[must_use]
    pub fn default_dimensions(&self) -> GridDimensions {
        GridDimensions::clamped(self.defaults.rows, self.defaults.cols)
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `config_path`, falling back to defaults when absent.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to `config_path`.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let DefaultsConfig { rows, cols } = self.defaults;
        if !(1..=MAX_ROWS).contains(&rows) {
            anyhow::bail!("defaults.rows must be between 1 and {MAX_ROWS}, got {rows}");
        }
        if !(1..=MAX_COLS).contains(&cols) {
            anyhow::bail!("defaults.cols must be between 1 and {MAX_COLS}, got {cols}");
        }
        Ok(())
    }
}
