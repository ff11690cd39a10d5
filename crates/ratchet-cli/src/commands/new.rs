//! New command implementation

use anyhow::{Context, Result};
use chrono::Utc;
use ratchet_runner::scaffold::create_migration;

use crate::cli::{GlobalArgs, NewArgs};
use crate::context::{load_config, runner_config};

/// Execute the new command; needs no database connection
pub fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global, &args.dir)?;
    let dir = runner_config(&config).migrations_dir;

    let file = create_migration(&dir, &args.name, Utc::now())
        .with_context(|| format!("Failed to create migration '{}'", args.name))?;

    println!("Created {}", file.path.display());
    Ok(())
}
