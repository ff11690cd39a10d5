//! CLI command implementations

pub(crate) mod down;
pub(crate) mod new;
pub(crate) mod reset;
pub(crate) mod status;
pub(crate) mod up;

use ratchet_runner::RevertReport;

/// Print the outcome of a down / reset run
pub(crate) fn print_revert_report(report: &RevertReport) {
    if report.is_noop() {
        println!("No applied migrations to revert.");
        return;
    }

    for name in &report.reverted {
        println!("  ✓ {}", name);
    }
    for skipped in &report.skipped {
        println!("  - {}", skipped);
    }

    println!();
    println!(
        "Reverted {} migration(s), skipped {} in {:.2}s",
        report.reverted.len(),
        report.skipped.len(),
        report.duration.as_secs_f64()
    );
}
