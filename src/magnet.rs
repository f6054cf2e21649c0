//! Magnet link handling.
//!
//! Provides the [`MagnetEntry`] type and the hash normalization rules used
//! for deduplication. BitTorrent v1 info-hashes appear in two encodings in
//! the wild: 40 hex characters (any case) and 32-character RFC 4648 base32.
//! Both normalize to the same canonical form here: lowercase hex.

use serde::Serialize;
use thiserror::Error;

/// Canonical info-hash length: 20 bytes as lowercase hex.
pub const HEX_HASH_LEN: usize = 40;

/// Base32-encoded info-hash length (20 bytes in 5-bit groups).
const BASE32_HASH_LEN: usize = 32;

/// A single magnet entry from a backup, keyed by its normalized hash.
///
/// Two entries are the same magnet iff their hashes match; the display
/// name never participates in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MagnetEntry {
    /// Normalized lowercase hex info-hash.
    pub hash: String,
    /// Display name from the backup (DMM `filename` field), if present.
    pub display_name: Option<String>,
}

impl MagnetEntry {
    /// Render the magnet URI for this entry.
    ///
    /// Produces `magnet:?xt=urn:btih:<hash>` with a `&dn=` parameter when a
    /// display name exists.
    #[must_use]
    pub fn uri(&self) -> String {
        build_uri(&self.hash, self.display_name.as_deref())
    }
}

/// Why a raw hash failed normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("hash is empty")]
    Empty,

    #[error("hash has length {0}, expected 40 hex or 32 base32 chars")]
    Length(usize),

    #[error("hash contains non-hex characters")]
    NotHex,

    #[error("hash contains invalid base32 characters")]
    NotBase32,
}

/// Normalize a raw info-hash to canonical lowercase hex.
///
/// Rules, in order:
/// - surrounding whitespace is trimmed;
/// - 40 characters: must be hex, case-folded to lowercase;
/// - 32 characters: must be RFC 4648 base32 (case-insensitive), decoded
///   and re-encoded as lowercase hex;
/// - any other length is invalid.
///
/// # Errors
///
/// Returns a [`HashError`] describing the first rule the input violates.
pub fn normalize_hash(raw: &str) -> Result<String, HashError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(HashError::Empty);
    }

    match raw.len() {
        HEX_HASH_LEN => {
            if raw.bytes().all(|b| b.is_ascii_hexdigit()) {
                Ok(raw.to_ascii_lowercase())
            } else {
                Err(HashError::NotHex)
            }
        }
        BASE32_HASH_LEN => {
            let bytes = decode_base32(raw).ok_or(HashError::NotBase32)?;
            Ok(hex::encode(bytes))
        }
        other => Err(HashError::Length(other)),
    }
}

/// Decode an unpadded RFC 4648 base32 string (case-insensitive).
///
/// Returns `None` on any character outside `A-Z` / `a-z` / `2-7`.
fn decode_base32(s: &str) -> Option<Vec<u8>> {
    let mut bits: u32 = 0;
    let mut nbits: u32 = 0;
    let mut out = Vec::with_capacity(s.len() * 5 / 8);

    for c in s.chars() {
        let value = match c {
            'A'..='Z' => c as u32 - 'A' as u32,
            'a'..='z' => c as u32 - 'a' as u32,
            '2'..='7' => c as u32 - '2' as u32 + 26,
            _ => return None,
        };
        bits = (bits << 5) | value;
        nbits += 5;
        if nbits >= 8 {
            nbits -= 8;
            out.push((bits >> nbits) as u8);
        }
    }

    Some(out)
}

/// Extract the raw info-hash from a magnet URI's `xt=urn:btih:` parameter.
///
/// Returns the hash exactly as it appears in the URI; callers normalize it
/// with [`normalize_hash`].
#[must_use]
pub fn extract_hash_from_uri(uri: &str) -> Option<&str> {
    let query = uri.strip_prefix("magnet:?")?;
    query
        .split('&')
        .find_map(|param| param.strip_prefix("xt=urn:btih:"))
        .filter(|hash| !hash.is_empty())
}

/// Build a magnet URI from a normalized hash and optional display name.
#[must_use]
pub fn build_uri(hash: &str, display_name: Option<&str>) -> String {
    match display_name {
        Some(name) => format!("magnet:?xt=urn:btih:{hash}&dn={name}"),
        None => format!("magnet:?xt=urn:btih:{hash}"),
    }
}
