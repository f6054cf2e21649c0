//! Reqwest-backed TorBox client.
//!
//! Endpoints consumed (TorBox API v1):
//! - `GET api/torrents/mylist`: active torrents, paginated
//! - `GET api/torrents/getqueued`: queued torrents, paginated
//! - `POST api/torrents/createtorrent`: add a magnet (form field `magnet`)
//!
//! All requests carry bearer auth; listings pass `bypass_cache=true` so the
//! inventory snapshot is as fresh as the API allows.

use serde::de::DeserializeOwned;

use super::types::{ApiEnvelope, TorrentItem};
use super::{ApiError, MagnetService};

/// Default TorBox API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.torbox.app/v1";

/// HTTP client for the TorBox API.
pub struct TorboxClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TorboxClient {
    /// Create a client against `base_url` authenticating with `api_key`.
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Decode a response into the standard envelope, mapping HTTP and
    /// API-level failures to [`ApiError`].
    async fn read_envelope<T: DeserializeOwned + Default>(
        response: reqwest::Response,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .detail
                    .unwrap_or_else(|| "no detail provided".to_string()),
            ));
        }

        Ok(envelope)
    }

    async fn list_endpoint(
        &self,
        endpoint: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<TorrentItem>, ApiError> {
        let response = self
            .client
            .get(self.url(endpoint))
            .bearer_auth(&self.api_key)
            .query(&[
                ("bypass_cache", "true".to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let envelope: ApiEnvelope<Vec<TorrentItem>> = Self::read_envelope(response).await?;
        Ok(envelope.data.unwrap_or_default())
    }
}

impl MagnetService for TorboxClient {
    async fn list_page(&self, offset: u32, limit: u32) -> Result<Vec<TorrentItem>, ApiError> {
        self.list_endpoint("api/torrents/mylist", offset, limit)
            .await
    }

    async fn list_queued_page(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<TorrentItem>, ApiError> {
        self.list_endpoint("api/torrents/getqueued", offset, limit)
            .await
    }

    async fn add_magnet(&self, magnet_uri: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("api/torrents/createtorrent"))
            .bearer_auth(&self.api_key)
            .form(&[("magnet", magnet_uri)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        // Successful adds return a data payload describing the torrent;
        // the importer only needs the success/detail verdict.
        let _envelope: ApiEnvelope<serde_json::Value> = Self::read_envelope(response).await?;
        Ok(())
    }
}
