//! In-memory [`MagnetService`] fake for driver and inventory tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use crate::magnet;
use crate::remote::{ApiError, MagnetService, TorrentItem};

/// Scriptable fake TorBox account.
///
/// Listings serve from in-memory vectors with real offset/limit pagination;
/// successful adds feed back into the active list so a second run sees them
/// in its inventory, mirroring the live API.
pub struct FakeService {
    existing: Mutex<Vec<TorrentItem>>,
    queued: Mutex<Vec<TorrentItem>>,
    /// Magnet URIs received by `add_magnet`, in call order.
    pub added: Mutex<Vec<String>>,
    listing_failures: Mutex<VecDeque<ApiError>>,
    listing_always_fail: Mutex<Option<ApiError>>,
    add_failures: Mutex<VecDeque<ApiError>>,
    /// Total listing requests (active + queued pages).
    pub list_calls: AtomicU32,
    /// Total add requests.
    pub add_calls: AtomicU32,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            existing: Mutex::new(Vec::new()),
            queued: Mutex::new(Vec::new()),
            added: Mutex::new(Vec::new()),
            listing_failures: Mutex::new(VecDeque::new()),
            listing_always_fail: Mutex::new(None),
            add_failures: Mutex::new(VecDeque::new()),
            list_calls: AtomicU32::new(0),
            add_calls: AtomicU32::new(0),
        }
    }

    pub fn push_existing(&self, hash: &str) {
        self.existing.lock().unwrap().push(TorrentItem {
            hash: Some(hash.to_string()),
            name: None,
        });
    }

    pub fn push_queued(&self, hash: &str) {
        self.queued.lock().unwrap().push(TorrentItem {
            hash: Some(hash.to_string()),
            name: None,
        });
    }

    /// Fail every listing request from now on.
    pub fn fail_listings(&self, error: ApiError) {
        *self.listing_always_fail.lock().unwrap() = Some(error);
    }

    /// Fail only the next listing request.
    pub fn fail_next_listing(&self, error: ApiError) {
        self.listing_failures.lock().unwrap().push_back(error);
    }

    /// Queue a failure for an upcoming add request, consumed in order.
    pub fn fail_next_add(&self, error: ApiError) {
        self.add_failures.lock().unwrap().push_back(error);
    }

    pub fn added_uris(&self) -> Vec<String> {
        self.added.lock().unwrap().clone()
    }

    fn listing_error(&self) -> Option<ApiError> {
        if let Some(err) = self.listing_always_fail.lock().unwrap().as_ref() {
            return Some(err.clone());
        }
        self.listing_failures.lock().unwrap().pop_front()
    }

    fn page(items: &[TorrentItem], offset: u32, limit: u32) -> Vec<TorrentItem> {
        items
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect()
    }
}

impl MagnetService for FakeService {
    async fn list_page(&self, offset: u32, limit: u32) -> Result<Vec<TorrentItem>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.listing_error() {
            return Err(err);
        }
        Ok(Self::page(&self.existing.lock().unwrap(), offset, limit))
    }

    async fn list_queued_page(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<TorrentItem>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.listing_error() {
            return Err(err);
        }
        Ok(Self::page(&self.queued.lock().unwrap(), offset, limit))
    }

    async fn add_magnet(&self, magnet_uri: &str) -> Result<(), ApiError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.add_failures.lock().unwrap().pop_front() {
            return Err(err);
        }

        self.added.lock().unwrap().push(magnet_uri.to_string());

        // reflect the add in the active list, like the live account would
        if let Some(raw) = magnet::extract_hash_from_uri(magnet_uri) {
            if let Ok(hash) = magnet::normalize_hash(raw) {
                self.push_existing(&hash);
            }
        }
        Ok(())
    }
}
