//! Branding and application identity configuration.
//!
//! Names and paths that identify the application live here so the rest of the
//! code never spells them out.

/// The human-readable display name of the application.
///
/// Used in:
/// - The TUI title bar
/// - Help text
pub const APP_DISPLAY_NAME: &str = "LazyPanel";

/// The binary/executable name (lowercase, no spaces).
pub const APP_BINARY_NAME: &str = "lazypanel";

/// The directory name for application data (config, log, saved schema).
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/` and `~/.local/share/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "LazyPanel";

/// Short description for help text.
pub const APP_DESCRIPTION: &str = "Terminal schema builder for electrical panels";

/// Title line shown in the TUI header.
#[must_use]
pub fn title_line() -> String {
    format!("{APP_DISPLAY_NAME} v{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branding_consistency() {
        assert_eq!(APP_BINARY_NAME, APP_BINARY_NAME.to_lowercase());
        assert!(!APP_BINARY_NAME.contains(' '));
        assert_eq!(APP_BINARY_NAME, env!("CARGO_PKG_NAME"));
        assert!(!APP_DATA_DIR.contains('/'));
    }

    #[test]
    fn test_title_line_has_version() {
        assert!(title_line().starts_with("LazyPanel v"));
    }
}
