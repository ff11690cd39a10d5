//! Up command implementation

use anyhow::{Context, Result};

use crate::cli::{DirArgs, GlobalArgs};
use crate::context::RuntimeContext;

/// Execute the up command
pub async fn execute(args: &DirArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global, args)?;
    let report = ctx
        .runner
        .apply_all()
        .await
        .context("Migration run failed")?;

    for name in &report.applied {
        println!("  ✓ {}", name);
    }
    for name in &report.empty {
        println!("  - {} (no up statements)", name);
    }

    if report.applied.is_empty() {
        println!("Nothing to migrate.");
    } else {
        println!();
        println!(
            "Applied {} migration(s) in {:.2}s",
            report.applied.len(),
            report.duration.as_secs_f64()
        );
    }

    Ok(())
}
