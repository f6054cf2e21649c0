//! Run summary.
//!
//! Aggregates the final decision list into counts plus an ordered failure
//! list. The summary has the same shape for dry-run and live runs; only the
//! outcome values differ, so a dry run previews exactly what a live run
//! would report.

use colored::Colorize;
use serde::Serialize;

use crate::sync::types::{SubmitOutcome, SyncDecision};

/// Aggregate outcome of one sync run. Derived from the decision list and
/// not mutated afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Submissions confirmed added (or all candidates, in dry-run).
    pub added: usize,
    /// Candidates never driven to a terminal outcome.
    pub pending: usize,
    /// Submissions that ended in failure.
    pub failed: usize,
    /// Entries already present remotely or repeated within the batch.
    pub skipped_duplicate: usize,
    /// Backup records without a usable hash.
    pub skipped_invalid: usize,
    /// Failed entries in submission order.
    pub failures: Vec<FailedEntry>,
}

/// One failed submission, for operator review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedEntry {
    pub hash: String,
    pub display_name: Option<String>,
    pub reason: String,
}

impl RunSummary {
    /// Aggregate a finished decision list.
    #[must_use]
    pub fn from_decisions(decisions: &[SyncDecision]) -> Self {
        let mut summary = Self::default();

        for decision in decisions {
            match decision {
                SyncDecision::Add { entry, outcome } => match outcome {
                    SubmitOutcome::Pending => summary.pending += 1,
                    SubmitOutcome::Succeeded { .. } => summary.added += 1,
                    SubmitOutcome::Failed { reason } => {
                        summary.failed += 1;
                        summary.failures.push(FailedEntry {
                            hash: entry.hash.clone(),
                            display_name: entry.display_name.clone(),
                            reason: reason.to_string(),
                        });
                    }
                },
                SyncDecision::SkipDuplicate { .. } => summary.skipped_duplicate += 1,
                SyncDecision::SkipInvalid { .. } => summary.skipped_invalid += 1,
            }
        }

        summary
    }

    /// Total records accounted for.
    #[must_use]
    pub fn total(&self) -> usize {
        self.added + self.pending + self.failed + self.skipped_duplicate + self.skipped_invalid
    }
}

/// Print the human-readable summary.
pub fn print_summary(summary: &RunSummary, dry_run: bool) {
    let title = if dry_run {
        "Sync complete (dry run)"
    } else {
        "Sync complete"
    };
    println!("{}", title.bold().underline());
    println!();

    let added_label = if dry_run { "Would add:" } else { "Added:" };
    let added = format!("  {added_label:<20}{}", summary.added);
    if summary.added > 0 {
        println!("{}", added.green());
    } else {
        println!("{added}");
    }
    if summary.pending > 0 {
        println!("  {:<20}{}", "Pending:", summary.pending);
    }
    println!("  {:<20}{}", "Skipped (existing):", summary.skipped_duplicate);
    println!("  {:<20}{}", "Skipped (invalid):", summary.skipped_invalid);
    let failed = format!("  {:<20}{}", "Failed:", summary.failed);
    if summary.failed > 0 {
        println!("{}", failed.red());
    } else {
        println!("{failed}");
    }
    println!();
    println!("  Total: {} records", summary.total());

    if !summary.failures.is_empty() {
        println!();
        println!("{}", "Failures:".red().bold());
        for entry in &summary.failures {
            let name = entry.display_name.as_deref().unwrap_or("<unnamed>");
            println!("  {}  {}: {}", entry.hash, name, entry.reason);
        }
    }
}
