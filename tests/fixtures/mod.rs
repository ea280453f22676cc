//! Shared helpers for end-to-end CLI tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Path to the lazypanel binary
pub fn lazypanel_bin() -> String {
    std::env::var("CARGO_BIN_EXE_lazypanel")
        .unwrap_or_else(|_| "target/release/lazypanel".to_string())
}

/// Isolated config and storage directories for one test.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    /// Creates fresh, empty directories.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Root of the sandbox.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Directory passed as `--storage-dir`.
    pub fn storage_dir(&self) -> PathBuf {
        self.dir.path().join("storage")
    }

    /// Directory used as `LAZYPANEL_CONFIG_DIR`.
    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Command with isolated config, without a storage override.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(lazypanel_bin());
        cmd.env("LAZYPANEL_CONFIG_DIR", self.config_dir());
        cmd.env_remove("RUST_LOG");
        cmd.args(args);
        cmd
    }

    /// Runs a command against the sandbox storage directory.
    pub fn run(&self, args: &[&str]) -> Output {
        let storage = self.storage_dir();
        let mut cmd = self.command(args);
        cmd.arg("--storage-dir").arg(storage);
        cmd.output().expect("Failed to execute command")
    }

    /// Runs a command that must succeed and returns its stdout.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert_success(&output);
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

/// Asserts exit code 0, printing stderr otherwise.
pub fn assert_success(output: &Output) {
    assert_eq!(
        output.status.code(),
        Some(0),
        "Command should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Asserts the given exit code.
pub fn assert_exit_code(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "Unexpected exit code. stdout: {} stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
