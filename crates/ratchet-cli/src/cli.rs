//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Ratchet - apply and revert versioned SQL migrations tracked in a ledger table
#[derive(Parser, Debug)]
#[command(name = "ratchet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output (info-level logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: ratchet.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Database connection string (duckdb://path, :memory:, or a file path)
    #[arg(long, global = true, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply all pending migrations
    Up(DirArgs),

    /// Revert the most recently applied migration
    Down(DirArgs),

    /// Revert every applied migration, newest first
    Reset(DirArgs),

    /// Show applied and pending migrations
    Status(DirArgs),

    /// Create a new migration file
    New(NewArgs),
}

/// Migrations directory selection shared by all commands
#[derive(Args, Debug, Clone, Default)]
pub struct DirArgs {
    /// Migrations directory (overrides `migrations_dir` in the config)
    #[arg(short, long, env = "RATCHET_MIGRATIONS_DIR")]
    pub dir: Option<String>,
}

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Description of the migration, e.g. "create users"
    #[arg(short, long)]
    pub name: String,

    #[command(flatten)]
    pub dir: DirArgs,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
