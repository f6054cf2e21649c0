//! Submission driver.
//!
//! Walks the decision list in order and submits every `Add` candidate,
//! updating its outcome in place. Submissions are strictly serial with a
//! minimum delay between requests; TorBox rate-limits aggressively and a
//! single paced stream keeps retry accounting per-entry. One entry failing
//! never aborts the batch.

use tracing::{info, warn};

use crate::remote::{with_retries, MagnetService};
use crate::sync::types::{FailureReason, SubmitOutcome, SyncDecision, SyncSettings};

/// Drive every `Add` decision to a terminal outcome.
///
/// In dry-run mode no remote call is made; each candidate is marked
/// `Succeeded { retries: 0 }` so the report shows exactly what a live run
/// would attempt. In live mode each candidate gets one paced submission
/// with bounded retries, and the outcome records either the retry count or
/// the terminal failure reason.
pub async fn submit_all<S: MagnetService>(
    service: &S,
    decisions: &mut [SyncDecision],
    settings: &SyncSettings,
) {
    let total = decisions.iter().filter(|d| d.is_add()).count();
    if total == 0 {
        info!("no new magnets to submit");
        return;
    }

    let mut position = 0usize;
    let mut succeeded = 0usize;

    for decision in decisions.iter_mut() {
        let SyncDecision::Add { entry, outcome } = decision else {
            continue;
        };
        position += 1;

        if settings.dry_run {
            info!(
                hash = %entry.hash,
                "would add magnet ({position}/{total}) [dry run]"
            );
            *outcome = SubmitOutcome::Succeeded { retries: 0 };
            succeeded += 1;
            continue;
        }

        // pace between requests, not before the first
        if position > 1 {
            tokio::time::sleep(settings.request_delay).await;
        }

        let uri = entry.uri();
        match with_retries(&settings.retry, "magnet add", || service.add_magnet(&uri)).await {
            Ok(((), retries)) => {
                info!(hash = %entry.hash, retries, "added magnet ({position}/{total})");
                *outcome = SubmitOutcome::Succeeded { retries };
                succeeded += 1;
            }
            Err(e) => {
                warn!(hash = %entry.hash, error = %e, "giving up on magnet ({position}/{total})");
                let reason = if e.is_transient() {
                    FailureReason::RetriesExhausted {
                        message: e.to_string(),
                    }
                } else {
                    FailureReason::Rejected {
                        message: e.to_string(),
                    }
                };
                *outcome = SubmitOutcome::Failed { reason };
            }
        }
    }

    info!(attempted = total, succeeded, "submission pass complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magnet::MagnetEntry;
    use crate::remote::{ApiError, RetryPolicy};
    use crate::sync::testing::FakeService;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    const HASH_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1";
    const HASH_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb2";
    const HASH_C: &str = "ccccccccccccccccccccccccccccccccccccccc3";

    fn add(hash: &str, name: &str) -> SyncDecision {
        SyncDecision::Add {
            entry: MagnetEntry {
                hash: hash.to_string(),
                display_name: Some(name.to_string()),
            },
            outcome: SubmitOutcome::Pending,
        }
    }

    fn skip(hash: &str) -> SyncDecision {
        SyncDecision::SkipDuplicate {
            entry: MagnetEntry {
                hash: hash.to_string(),
                display_name: None,
            },
        }
    }

    fn instant_settings(dry_run: bool) -> SyncSettings {
        SyncSettings {
            dry_run,
            request_delay: Duration::ZERO,
            retry: RetryPolicy {
                max_retries: 3,
                backoff_base: Duration::ZERO,
            },
        }
    }

    fn outcome(decision: &SyncDecision) -> &SubmitOutcome {
        match decision {
            SyncDecision::Add { outcome, .. } => outcome,
            _ => panic!("not an add decision"),
        }
    }

    #[tokio::test]
    async fn test_dry_run_issues_no_requests() {
        let service = FakeService::new();
        let mut decisions = vec![add(HASH_A, "A"), add(HASH_B, "B")];

        submit_all(&service, &mut decisions, &instant_settings(true)).await;

        assert_eq!(service.add_calls.load(Ordering::SeqCst), 0);
        for decision in &decisions {
            assert_eq!(
                outcome(decision),
                &SubmitOutcome::Succeeded { retries: 0 }
            );
        }
    }

    #[tokio::test]
    async fn test_live_issues_one_request_per_add() {
        let service = FakeService::new();
        let mut decisions = vec![add(HASH_A, "A"), skip(HASH_C), add(HASH_B, "B")];

        submit_all(&service, &mut decisions, &instant_settings(false)).await;

        assert_eq!(service.add_calls.load(Ordering::SeqCst), 2);
        let uris = service.added_uris();
        assert_eq!(uris.len(), 2);
        assert!(uris[0].contains(HASH_A));
        assert!(uris[1].contains(HASH_B));
    }

    #[tokio::test]
    async fn test_submission_order_preserved() {
        let service = FakeService::new();
        let mut decisions = vec![add(HASH_C, "C"), add(HASH_A, "A"), add(HASH_B, "B")];

        submit_all(&service, &mut decisions, &instant_settings(false)).await;

        let uris = service.added_uris();
        assert!(uris[0].contains(HASH_C));
        assert!(uris[1].contains(HASH_A));
        assert!(uris[2].contains(HASH_B));
    }

    #[tokio::test]
    async fn test_transient_failures_then_success_records_retry_count() {
        let service = FakeService::new();
        for _ in 0..3 {
            service.fail_next_add(ApiError::Http {
                status: 429,
                message: "rate limited".into(),
            });
        }
        let mut decisions = vec![add(HASH_A, "A")];

        submit_all(&service, &mut decisions, &instant_settings(false)).await;

        assert_eq!(outcome(&decisions[0]), &SubmitOutcome::Succeeded { retries: 3 });
        assert_eq!(service.add_calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_exhausted_retries_fail_entry_but_not_batch() {
        let service = FakeService::new();
        // 4 transient failures exceed the 3-retry budget for the first entry
        for _ in 0..4 {
            service.fail_next_add(ApiError::Network("timeout".into()));
        }
        let mut decisions = vec![add(HASH_A, "A"), add(HASH_B, "B")];

        submit_all(&service, &mut decisions, &instant_settings(false)).await;

        match outcome(&decisions[0]) {
            SubmitOutcome::Failed {
                reason: FailureReason::RetriesExhausted { .. },
            } => {}
            other => panic!("expected retries exhausted, got {other:?}"),
        }
        // the second entry still went through
        assert_eq!(outcome(&decisions[1]), &SubmitOutcome::Succeeded { retries: 0 });
    }

    #[tokio::test]
    async fn test_terminal_rejection_not_retried() {
        let service = FakeService::new();
        service.fail_next_add(ApiError::Rejected("DOWNLOAD_LIMIT_REACHED".into()));
        let mut decisions = vec![add(HASH_A, "A")];

        submit_all(&service, &mut decisions, &instant_settings(false)).await;

        assert_eq!(service.add_calls.load(Ordering::SeqCst), 1);
        match outcome(&decisions[0]) {
            SubmitOutcome::Failed {
                reason: FailureReason::Rejected { message },
            } => assert!(message.contains("DOWNLOAD_LIMIT_REACHED")),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_skip_decisions_left_untouched() {
        let service = FakeService::new();
        let mut decisions = vec![skip(HASH_A)];

        submit_all(&service, &mut decisions, &instant_settings(false)).await;

        assert_eq!(service.add_calls.load(Ordering::SeqCst), 0);
        assert!(matches!(decisions[0], SyncDecision::SkipDuplicate { .. }));
    }
}
