//! TorBox API access.
//!
//! The HTTP surface is abstracted behind the [`MagnetService`] trait so the
//! inventory fetcher and submission driver can run against an in-memory fake
//! in tests. [`TorboxClient`] is the reqwest-backed implementation.
//!
//! Error classification lives here too: [`ApiError`] splits failures into
//! transient (worth retrying) and terminal, and [`retry::with_retries`]
//! applies the shared bounded-backoff policy on top.

mod client;
pub mod retry;
mod types;

pub use client::{TorboxClient, DEFAULT_BASE_URL};
pub use retry::{with_retries, RetryPolicy};
pub use types::{ApiEnvelope, TorrentItem};

use thiserror::Error;

/// A failed TorBox API call.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never got an HTTP response (connect failure, timeout).
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// HTTP-level success but the API envelope reported failure.
    #[error("rejected by TorBox: {0}")]
    Rejected(String),

    /// The response body did not match the expected envelope.
    #[error("malformed API response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether retrying the same request may succeed.
    ///
    /// Network failures, server errors (5xx) and rate-limit responses (429)
    /// are transient. Other client errors, API-level rejections and decode
    /// failures are terminal.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            Self::Rejected(_) | Self::Decode(_) => false,
        }
    }
}

/// The slice of the TorBox API this tool consumes.
///
/// Async methods follow the provider-trait shape: `impl Future` return
/// types keep the trait usable with plain generics, no boxing.
pub trait MagnetService: Send + Sync {
    /// One page of the account's active torrent list.
    fn list_page(
        &self,
        offset: u32,
        limit: u32,
    ) -> impl std::future::Future<Output = std::result::Result<Vec<TorrentItem>, ApiError>> + Send;

    /// One page of the account's queued torrent list.
    fn list_queued_page(
        &self,
        offset: u32,
        limit: u32,
    ) -> impl std::future::Future<Output = std::result::Result<Vec<TorrentItem>, ApiError>> + Send;

    /// Submit a magnet URI for download.
    fn add_magnet(
        &self,
        magnet_uri: &str,
    ) -> impl std::future::Future<Output = std::result::Result<(), ApiError>> + Send;
}
