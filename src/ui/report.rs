//! Terminal summary and error lines

use crate::commands::sync::{SyncReport, SYNCED_OUTPUT_LABEL};
use crate::types::SyncError;
use console::style;
use indicatif::HumanBytes;

/// Prefix on every line the binary prints
pub const PREFIX: &str = "[relsync]";

/// `[relsync] Synced: sql/a.sql, sql/b.sql`
pub fn format_summary(report: &SyncReport) -> String {
    let paths = report
        .relative_outputs()
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} {}: {}", PREFIX, report.action(), paths)
}

/// Per-output lines with sizes, for verbose runs
pub fn format_details(report: &SyncReport) -> Vec<String> {
    report
        .relative_outputs()
        .iter()
        .zip(&report.outputs)
        .map(|(path, output)| format!("  {} ({})", path.display(), HumanBytes(output.bytes)))
        .collect()
}

/// `[relsync] ERROR: <message>`
pub fn format_error(message: &str) -> String {
    format!("{} ERROR: {}", PREFIX, message)
}

/// Follow-up hint for an error, chosen by error class
pub fn suggestion(error: &SyncError) -> Option<&'static str> {
    const REGENERATE: &str = "Run without --check to regenerate the synced outputs.";

    match error {
        SyncError::ContentMismatch { .. } => Some(REGENERATE),
        SyncError::MissingFile { label, .. } if label == SYNCED_OUTPUT_LABEL => Some(REGENERATE),
        SyncError::Config(_) => None,
        e if e.is_io_error() => Some(
            "Check that --apollo-repo-root and --quick-start-root point at the right checkouts.",
        ),
        e if e.is_validation_error() => Some(
            "Inspect the upstream SQL and local overlays; the upstream format may have changed.",
        ),
        _ => None,
    }
}

/// `[relsync] Try: <hint>`
pub fn format_suggestion(hint: &str) -> String {
    format!("{} Try: {}", PREFIX, hint)
}

/// Print the summary line to stdout
pub fn print_summary(report: &SyncReport) {
    let line = format_summary(report);
    println!("{}", style(line).green());
    for detail in format_details(report) {
        tracing::debug!("{}", detail);
    }
}

/// Print an error line, and a hint line when there is one, to stderr
pub fn print_error(message: &str, hint: Option<&str>) {
    eprintln!("{}", style(format_error(message)).for_stderr().red());
    if let Some(hint) = hint {
        eprintln!("{}", style(format_suggestion(hint)).for_stderr().yellow());
    }
}
