//! Command-line surface, parsed with clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// il2decomp - IL2CPP decompilation pipeline driver
///
/// Hashes a game's IL2CPP assembly into a reusable workspace, then runs
/// Il2CppDumper and a headless Ghidra import so repeated analysis of the
/// same build picks up where it left off.
#[derive(Parser, Debug)]
#[command(name = "il2decomp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Use an alternate config file
    #[arg(short, long, global = true, env = "IL2DECOMP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decompile a game (dump, header, Ghidra import)
    Run(RunArgs),

    /// Open a decompiled workspace in the Ghidra GUI
    Open(OpenArgs),

    /// List cached workspaces
    List(ListArgs),

    /// Check toolchain health and configuration
    Status,

    /// Inspect or edit configuration
    Config(ConfigArgs),

    /// Remove cached workspaces
    Clean(CleanArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Game directory or GameAssembly path
    pub game: PathBuf,

    /// Redo every stage even when outputs already exist
    #[arg(long)]
    pub fresh: bool,

    /// Skip launching the Ghidra GUI after the pipeline finishes
    #[arg(long)]
    pub no_open: bool,
}

/// Arguments for the open command
#[derive(Parser, Debug)]
pub struct OpenArgs {
    /// Workspace identifier or game path (omit to launch bare Ghidra)
    pub target: Option<String>,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// How to print the listing
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Config operation, defaults to show
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the active configuration as TOML
    Show,

    /// Print the config file location
    Path,

    /// Write a default config file for editing
    Init {
        /// Replace an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Change one configuration key
    Set {
        /// Dot-separated key, e.g. tools.ghidra
        key: String,
        /// New value for the key
        value: String,
    },
}

/// Arguments for the clean command
#[derive(Parser, Debug)]
pub struct CleanArgs {
    /// Workspace identifiers to remove
    pub ids: Vec<String>,

    /// Remove every cached workspace
    #[arg(long, conflicts_with = "ids")]
    pub all: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Output format for the list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Columned table with progress colors
    Table,
    /// JSON array of workspace entries
    Json,
    /// Bare workspace ids, one per line
    Plain,
}
