//! Sync decision types.
//!
//! A run turns every backup record into exactly one [`SyncDecision`].
//! Decisions are created by the reconciler and, for `Add`, updated in place
//! by the submission driver; the reporter consumes the final list. Each
//! variant carries only the data that can exist for it: an invalid record
//! never has a [`MagnetEntry`], and only candidates for submission have an
//! outcome.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use crate::backup::MalformedRecord;
use crate::magnet::MagnetEntry;
use crate::remote::RetryPolicy;

/// Set of normalized hashes already present in the TorBox account.
///
/// Built once per run and treated as a read-only snapshot; magnets added
/// outside this run after the snapshot are not detected.
pub type RemoteInventory = HashSet<String>;

/// The fate of one backup record.
#[derive(Debug, Clone)]
pub enum SyncDecision {
    /// Not present remotely and first of its hash in the batch: submit it.
    Add {
        entry: MagnetEntry,
        outcome: SubmitOutcome,
    },
    /// Already in the remote inventory, or a repeat within the batch.
    SkipDuplicate { entry: MagnetEntry },
    /// The backup record had no usable hash.
    SkipInvalid { record: MalformedRecord },
}

impl SyncDecision {
    /// Whether this decision is a submission candidate.
    #[must_use]
    pub const fn is_add(&self) -> bool {
        matches!(self, Self::Add { .. })
    }

    /// Normalized hash, when the record parsed to one.
    #[must_use]
    pub fn hash(&self) -> Option<&str> {
        match self {
            Self::Add { entry, .. } | Self::SkipDuplicate { entry } => Some(&entry.hash),
            Self::SkipInvalid { .. } => None,
        }
    }
}

/// Terminal state of a submission candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not yet driven.
    Pending,
    /// Confirmed added; `retries` counts retry attempts before success
    /// (0 when the first request went through).
    Succeeded { retries: u32 },
    /// Gave up on this entry; the run continues.
    Failed { reason: FailureReason },
}

/// Why a submission ended in failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Transient errors persisted past the retry budget.
    RetriesExhausted { message: String },
    /// TorBox rejected the entry outright.
    Rejected { message: String },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RetriesExhausted { message } => {
                write!(f, "retries exhausted: {message}")
            }
            Self::Rejected { message } => write!(f, "rejected: {message}"),
        }
    }
}

/// Knobs for one sync run, resolved once and passed through explicitly.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Compute decisions but never call the add endpoint.
    pub dry_run: bool,
    /// Minimum delay between consecutive add requests.
    pub request_delay: Duration,
    /// Shared retry policy for inventory pages and submissions.
    pub retry: RetryPolicy,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            dry_run: false,
            request_delay: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_hash_accessor() {
        let entry = MagnetEntry {
            hash: "c9e15763f722f23e98a29decdfae341b98d53056".to_string(),
            display_name: None,
        };
        let add = SyncDecision::Add {
            entry: entry.clone(),
            outcome: SubmitOutcome::Pending,
        };
        assert_eq!(add.hash(), Some(entry.hash.as_str()));
        assert!(add.is_add());

        let invalid = SyncDecision::SkipInvalid {
            record: MalformedRecord {
                index: 0,
                display_name: None,
                reason: "record has no hash or magnet field".to_string(),
            },
        };
        assert_eq!(invalid.hash(), None);
        assert!(!invalid.is_add());
    }

    #[test]
    fn test_failure_reason_display() {
        let reason = FailureReason::Rejected {
            message: "DOWNLOAD_LIMIT_REACHED".to_string(),
        };
        assert_eq!(reason.to_string(), "rejected: DOWNLOAD_LIMIT_REACHED");
    }
}
