//! Down command implementation

use anyhow::{Context, Result};

use crate::cli::{DirArgs, GlobalArgs};
use crate::commands::print_revert_report;
use crate::context::RuntimeContext;

/// Execute the down command
pub async fn execute(args: &DirArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global, args)?;
    let report = ctx
        .runner
        .revert_last()
        .await
        .context("Revert failed")?;

    print_revert_report(&report);
    Ok(())
}
