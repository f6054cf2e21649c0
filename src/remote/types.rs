//! TorBox API payload types.
//!
//! Only the fields the importer reads are modeled; everything else in the
//! responses is ignored.

use serde::Deserialize;

/// Standard TorBox response envelope: `{ success, detail, data }`.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// API-level success flag; may be false even on HTTP 200.
    #[serde(default)]
    pub success: bool,
    /// Human-readable message, present on both success and failure.
    #[serde(default)]
    pub detail: Option<String>,
    /// Endpoint-specific payload.
    #[serde(default)]
    pub data: Option<T>,
}

/// One torrent from the `mylist` / `getqueued` listings.
#[derive(Debug, Clone, Deserialize)]
pub struct TorrentItem {
    /// Info-hash as reported by TorBox.
    #[serde(default)]
    pub hash: Option<String>,
    /// Torrent name, unused for dedup but handy in logs.
    #[serde(default)]
    pub name: Option<String>,
}
