//! Status command implementation

use anyhow::{Context, Result};

use crate::cli::{DirArgs, GlobalArgs};
use crate::context::RuntimeContext;

/// Execute the status command
pub async fn execute(args: &DirArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global, args)?;
    let report = ctx
        .runner
        .status()
        .await
        .context("Failed to read migration status")?;

    let ledger = &ctx.config.ledger;
    if !report.ledger_exists {
        println!(
            "Ledger table {}.{} does not exist; no migrations applied.",
            ledger.schema, ledger.table
        );
    } else if report.applied.is_empty() {
        println!("No migrations applied.");
    } else {
        println!("Applied ({}):", report.applied.len());
        for entry in &report.applied {
            println!(
                "  {}  {}",
                entry.executed_at.format("%Y-%m-%d %H:%M:%S UTC"),
                entry.name
            );
        }
    }

    if !report.pending.is_empty() {
        println!();
        println!("Pending ({}):", report.pending.len());
        for name in &report.pending {
            println!("  {}", name);
        }
    }

    Ok(())
}
