//! Reconciliation of backup records against the remote inventory.
//!
//! Pure decision logic: no I/O, separately testable from networking. The
//! submission driver acts on the output; this module only decides.

use std::collections::HashSet;

use crate::backup::ParsedRecord;
use crate::sync::types::{RemoteInventory, SubmitOutcome, SyncDecision};

/// Assign a [`SyncDecision`] to every parsed record, in original order.
///
/// A valid entry becomes `Add` unless its hash is already in the remote
/// inventory or appeared earlier in the batch; either way the duplicate is
/// `SkipDuplicate`. Within the batch, first-seen-wins: only the first
/// occurrence of a hash can be `Add`. Invalid records pass through as
/// `SkipInvalid` so they stay visible in the report.
pub fn reconcile<I>(records: I, inventory: &RemoteInventory) -> Vec<SyncDecision>
where
    I: IntoIterator<Item = ParsedRecord>,
{
    let mut seen: HashSet<String> = HashSet::new();

    records
        .into_iter()
        .map(|record| match record {
            ParsedRecord::Invalid(record) => SyncDecision::SkipInvalid { record },
            ParsedRecord::Entry(entry) => {
                if inventory.contains(&entry.hash) || !seen.insert(entry.hash.clone()) {
                    SyncDecision::SkipDuplicate { entry }
                } else {
                    SyncDecision::Add {
                        entry,
                        outcome: SubmitOutcome::Pending,
                    }
                }
            }
        })
        .collect()
}
