//! LazyPanel - terminal schema builder for electrical panels.
//!
//! Without a subcommand the interactive editor starts. Subcommands expose the
//! same operations headlessly.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lazypanel::branding::APP_DESCRIPTION;
use lazypanel::cli::{
    ClearArgs, CliError, ConfigArgs, EraseArgs, ExportArgs, GlobalOptions, NewArgs, PlaceArgs,
    ShowArgs,
};
use lazypanel::logging;

/// LazyPanel - terminal schema builder for electrical panels
#[derive(Parser, Debug)]
#[command(author, version, about = APP_DESCRIPTION, long_about = None)]
struct Cli {
    /// Directory holding the saved schema (overrides config)
    #[arg(long, value_name = "DIR", global = true)]
    storage_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive editor (default)
    Tui,
    /// Create an empty schema
    New(NewArgs),
    /// Place a module
    Place(PlaceArgs),
    /// Remove the module covering a cell
    Erase(EraseArgs),
    /// Print the schema
    Show(ShowArgs),
    /// Delete the schema
    Clear(ClearArgs),
    /// Export the schema as PNG
    Export(ExportArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

#[cfg(feature = "ratatui")]
fn run_tui(global: &GlobalOptions, verbose: bool) -> anyhow::Result<()> {
    lazypanel::tui::run(global, verbose)
}

#[cfg(not(feature = "ratatui"))]
fn run_tui(_global: &GlobalOptions, _verbose: bool) -> anyhow::Result<()> {
    anyhow::bail!("This build has no terminal UI. Use a subcommand, see --help")
}

fn main() {
    let cli = Cli::parse();
    let global = GlobalOptions {
        storage_dir: cli.storage_dir,
    };

    // The TUI sets up its own file logging once it owns the terminal.
    let command = cli.command.unwrap_or(Command::Tui);
    if !matches!(command, Command::Tui) {
        logging::init_stderr(cli.verbose);
    }

    let result = match command {
        Command::Tui => {
            run_tui(&global, cli.verbose).map_err(|e| CliError::io(format!("{e:#}")))
        }
        Command::New(args) => args.execute(&global),
        Command::Place(args) => args.execute(&global),
        Command::Erase(args) => args.execute(&global),
        Command::Show(args) => args.execute(&global),
        Command::Clear(args) => args.execute(&global),
        Command::Export(args) => args.execute(&global),
        Command::Config(args) => args.execute(),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(err.code.code());
    }
}
