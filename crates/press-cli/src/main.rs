//! Content Press CLI
//!
//! The command-line interface for reconciling declared content into a remote
//! content store.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd).await,
        None => {
            println!("{} Content Press CLI", "press".green().bold());
            println!();
            println!("Run {} for available commands.", "press --help".cyan());
            Ok(())
        }
    }
}

async fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Init { path } => commands::run_init(&cwd.join(path)),
        Commands::Sync { dry_run, json } => commands::run_sync(&cwd, dry_run, json).await,
        Commands::Check { json } => commands::run_check(&cwd, json).await,
        Commands::Rollback { component, yes } => commands::run_rollback(&cwd, &component, yes),
        Commands::Backups => commands::run_backups(&cwd),
    }
}
