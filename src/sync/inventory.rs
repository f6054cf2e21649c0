//! Remote inventory snapshot.
//!
//! Builds the dedup baseline by paging through the account's active and
//! queued torrent listings until both are exhausted. Failure here is fatal
//! for the run: without a complete baseline, dedup cannot be guaranteed, so
//! aborting before any submission is safer than risking duplicate adds.

use std::future::Future;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::magnet::normalize_hash;
use crate::remote::{with_retries, ApiError, MagnetService, RetryPolicy, TorrentItem};
use crate::sync::types::RemoteInventory;

/// Listing page size. TorBox caps listing responses well above this; a page
/// shorter than `PAGE_SIZE` marks the end of the listing.
pub const PAGE_SIZE: u32 = 1000;

/// Fetch the complete set of normalized hashes known to the account.
///
/// Active torrents and queued torrents both count as "present" for dedup
/// (a queued magnet re-submitted would duplicate once it starts). Remote
/// hashes that fail normalization are logged and skipped rather than
/// poisoning the snapshot.
///
/// # Errors
///
/// Returns [`Error::RemoteUnavailable`] when a listing page cannot be
/// retrieved within the retry policy.
pub async fn fetch_inventory<S: MagnetService>(
    service: &S,
    policy: &RetryPolicy,
) -> Result<RemoteInventory> {
    let mut hashes = RemoteInventory::new();

    drain_pages("torrent list", policy, &mut hashes, |offset| {
        service.list_page(offset, PAGE_SIZE)
    })
    .await?;

    drain_pages("queued torrent list", policy, &mut hashes, |offset| {
        service.list_queued_page(offset, PAGE_SIZE)
    })
    .await?;

    info!(count = hashes.len(), "remote inventory loaded");
    Ok(hashes)
}

/// Page through one listing endpoint, accumulating normalized hashes.
async fn drain_pages<F, Fut>(
    what: &str,
    policy: &RetryPolicy,
    hashes: &mut RemoteInventory,
    mut fetch: F,
) -> Result<()>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = std::result::Result<Vec<TorrentItem>, ApiError>>,
{
    let mut offset: u32 = 0;
    loop {
        let (page, _retries) = with_retries(policy, what, || fetch(offset))
            .await
            .map_err(|e| Error::RemoteUnavailable(format!("{what}: {e}")))?;

        let page_len = page.len();
        for item in page {
            let Some(raw) = item.hash else { continue };
            match normalize_hash(&raw) {
                Ok(hash) => {
                    hashes.insert(hash);
                }
                Err(e) => warn!(hash = %raw, error = %e, "skipping unparseable remote hash"),
            }
        }

        if page_len < PAGE_SIZE as usize {
            return Ok(());
        }
        offset += PAGE_SIZE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::RetryPolicy;
    use crate::sync::testing::FakeService;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn instant_policy() -> RetryPolicy {
        RetryPolicy {
            max_retries: 2,
            backoff_base: Duration::ZERO,
        }
    }

    const HASH_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1";
    const HASH_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb2";

    #[tokio::test]
    async fn test_accumulates_active_and_queued() {
        let service = FakeService::new();
        service.push_existing(HASH_A);
        service.push_queued(HASH_B);

        let inventory = fetch_inventory(&service, &instant_policy()).await.unwrap();
        assert_eq!(inventory.len(), 2);
        assert!(inventory.contains(HASH_A));
        assert!(inventory.contains(HASH_B));
    }

    #[tokio::test]
    async fn test_paginates_past_full_pages() {
        let service = FakeService::new();
        // one full page plus one extra forces a second request
        for i in 0..=PAGE_SIZE {
            service.push_existing(&format!("{i:040x}"));
        }

        let inventory = fetch_inventory(&service, &instant_policy()).await.unwrap();
        assert_eq!(inventory.len(), PAGE_SIZE as usize + 1);
        // two pages for the active list, one (empty) for the queued list
        assert_eq!(service.list_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_remote_hashes_normalized_for_dedup() {
        let service = FakeService::new();
        service.push_existing(&HASH_A.to_ascii_uppercase());

        let inventory = fetch_inventory(&service, &instant_policy()).await.unwrap();
        assert!(inventory.contains(HASH_A));
    }

    #[tokio::test]
    async fn test_unparseable_remote_hash_skipped() {
        let service = FakeService::new();
        service.push_existing("garbage");
        service.push_existing(HASH_A);

        let inventory = fetch_inventory(&service, &instant_policy()).await.unwrap();
        assert_eq!(inventory.len(), 1);
    }

    #[tokio::test]
    async fn test_listing_failure_is_fatal_after_retries() {
        let service = FakeService::new();
        service.fail_listings(ApiError::Http {
            status: 503,
            message: "maintenance".into(),
        });

        let err = fetch_inventory(&service, &instant_policy())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RemoteUnavailable(_)));
        // initial attempt + 2 retries
        assert_eq!(service.list_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_transient_listing_failure_recovers() {
        let service = FakeService::new();
        service.push_existing(HASH_A);
        service.fail_next_listing(ApiError::Network("reset".into()));

        let inventory = fetch_inventory(&service, &instant_policy()).await.unwrap();
        assert!(inventory.contains(HASH_A));
    }
}
