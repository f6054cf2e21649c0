//! The sync engine.
//!
//! Pipeline for one run:
//!
//! 1. **Inventory**: page through the account's existing and queued
//!    torrents into a read-only hash snapshot ([`fetch_inventory`]).
//! 2. **Reconcile**: walk the backup in order and decide add / skip per
//!    record, deduplicating against the snapshot and within the batch
//!    ([`reconcile`]).
//! 3. **Submit**: drive every add candidate serially with pacing and
//!    bounded retries ([`submit_all`]); dry-run stops at the side-effect
//!    boundary but still produces outcomes.
//! 4. **Report**: fold the decisions into a [`RunSummary`].
//!
//! Steps 2 and 4 are pure; all I/O goes through the [`MagnetService`]
//! abstraction so the whole pipeline runs against a fake in tests.
//!
//! A failed inventory aborts before any submission (dedup would be
//! guesswork); after that point, per-entry failures are recorded and the
//! run always completes.

mod driver;
mod inventory;
mod reconcile;
mod report;
#[cfg(test)]
pub(crate) mod testing;
mod types;

pub use driver::submit_all;
pub use inventory::{fetch_inventory, PAGE_SIZE};
pub use reconcile::reconcile;
pub use report::{print_summary, FailedEntry, RunSummary};
pub use types::{FailureReason, RemoteInventory, SubmitOutcome, SyncDecision, SyncSettings};

use crate::backup::Backup;
use crate::error::Result;
use crate::remote::MagnetService;

/// Run the full pipeline against `service`.
///
/// Returns the final decision list; the caller derives the summary and
/// chooses how to render it.
///
/// # Errors
///
/// Returns [`crate::Error::RemoteUnavailable`] when the inventory cannot be
/// established; per-entry submission failures are not errors.
pub async fn run<S: MagnetService>(
    service: &S,
    backup: Backup,
    settings: &SyncSettings,
) -> Result<Vec<SyncDecision>> {
    let inventory = fetch_inventory(service, &settings.retry).await?;
    let mut decisions = reconcile(backup.records(), &inventory);
    submit_all(service, &mut decisions, settings).await;
    Ok(decisions)
}
