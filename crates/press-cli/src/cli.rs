//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// Content Press - Reconcile declared content into a remote store
#[derive(Parser, Debug)]
#[command(name = "press")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a new publishing project
    ///
    /// Creates a starter press.toml and content.toml.
    ///
    /// Examples:
    ///   press init              # Initialize in current directory
    ///   press init my-site      # Create and initialize my-site/
    Init {
        /// Project directory (created if not ".")
        #[arg(default_value = ".")]
        path: String,
    },

    /// Reconcile declared content into the remote store
    ///
    /// Backs up the authoritative files, checks their integrity, then
    /// creates, updates, or skips each declared record.
    Sync {
        /// Decide without writing anything, locally or remotely
        #[arg(long)]
        dry_run: bool,

        /// Output the report as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Preview what sync would change
    ///
    /// Read-only: lists pending creates/updates and integrity differences.
    /// Exits non-zero when changes are pending, for CI use.
    Check {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Restore an authoritative file from its newest backup
    ///
    /// Components: "content" (the content document) or "config"
    /// (press.toml). Asks for confirmation unless --yes is given.
    Rollback {
        /// Component to restore
        component: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List backup snapshots
    Backups,
}
