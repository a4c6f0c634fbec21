//! il2decomp - IL2CPP decompilation pipeline driver
//!
//! Binary entry point: argument parsing, logging setup, config loading,
//! and the error-to-exit-code mapping live here.

use clap::Parser;
use console::style;
use il2decomp::cli::{Cli, Commands};
use il2decomp::config::ConfigManager;
use il2decomp::error::DecompResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            // Tool exit codes and OS errnos pass through for scripting
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> DecompResult<()> {
    let cli = Cli::parse();

    // -v count picks the level: default warn, -v info, -vv debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("il2decomp=warn"),
        1 => EnvFilter::new("il2decomp=info"),
        _ => EnvFilter::new("il2decomp=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Completions need no config at all
    if let Commands::Completions { shell } = &cli.command {
        return il2decomp::cli::commands::completions(*shell);
    }

    let manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = manager.load().await?;

    match cli.command {
        Commands::Completions { .. } => unreachable!("Completions handled above"),
        Commands::Run(args) => il2decomp::cli::commands::run(args, &config).await,
        Commands::Open(args) => il2decomp::cli::commands::open(args, &config).await,
        Commands::List(args) => il2decomp::cli::commands::list(args, &config).await,
        Commands::Status => il2decomp::cli::commands::status(&config).await,
        Commands::Config(args) => il2decomp::cli::commands::config(args, &config, &manager).await,
        Commands::Clean(args) => il2decomp::cli::commands::clean(args, &config).await,
    }
}
