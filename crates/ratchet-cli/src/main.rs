//! Ratchet CLI - apply, revert and scaffold SQL migrations

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::{Cli, Commands};
use commands::{down, new, reset, status, up};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        Commands::Up(args) => up::execute(args, &cli.global).await,
        Commands::Down(args) => down::execute(args, &cli.global).await,
        Commands::Reset(args) => reset::execute(args, &cli.global).await,
        Commands::Status(args) => status::execute(args, &cli.global).await,
        Commands::New(args) => new::execute(args, &cli.global),
    }
}

/// Install the logger: `warn` by default, `info` with `--verbose`;
/// `RUST_LOG` takes precedence over both.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
