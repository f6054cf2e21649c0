//! DMM backup parsing.
//!
//! A Debrid Media Manager backup is a JSON array of torrent records. Each
//! record carries an explicit `hash` field and/or an embedded `magnet` URI,
//! plus an optional `filename` used as the display name.
//!
//! Parsing is two-phase: [`Backup::load`] fails only when the top-level
//! structure is unreadable, while per-record defects surface as
//! [`ParsedRecord::Invalid`] during iteration so they appear in the final
//! report instead of aborting the run.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::magnet::{self, MagnetEntry};

/// One raw record from the backup file.
///
/// Unknown fields (collection names, UI state) are ignored; the importer
/// only needs enough to reconstruct a magnet link.
#[derive(Debug, Clone, Deserialize)]
pub struct BackupRecord {
    /// Explicit info-hash, as exported.
    #[serde(default)]
    pub hash: Option<String>,
    /// Full magnet URI; used when no explicit hash is present.
    #[serde(default)]
    pub magnet: Option<String>,
    /// Display name of the torrent.
    #[serde(default)]
    pub filename: Option<String>,
}

/// A backup record that could not be turned into a [`MagnetEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// Zero-based position in the backup file.
    pub index: usize,
    /// Display name, when the record had one.
    pub display_name: Option<String>,
    /// Human-readable defect description.
    pub reason: String,
}

/// Outcome of parsing one backup record.
#[derive(Debug, Clone)]
pub enum ParsedRecord {
    /// A well-formed magnet entry.
    Entry(MagnetEntry),
    /// A record with a missing or malformed hash.
    Invalid(MalformedRecord),
}

/// A loaded DMM backup.
#[derive(Debug)]
pub struct Backup {
    records: Vec<BackupRecord>,
}

impl Backup {
    /// Load a backup from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackupUnreadable`] if the file cannot be read or its
    /// top level is not a JSON array of records.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::BackupUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    /// Parse backup content, attributing failures to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackupUnreadable`] if the content is not a JSON
    /// array of records.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let records: Vec<BackupRecord> =
            serde_json::from_str(content).map_err(|e| Error::BackupUnreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self { records })
    }

    /// Number of records in the backup.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the backup contains no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Single-pass iterator over the backup in original order.
    ///
    /// Consumes the backup; each record is validated as it is yielded.
    pub fn records(self) -> impl Iterator<Item = ParsedRecord> {
        self.records
            .into_iter()
            .enumerate()
            .map(|(index, record)| parse_record(index, record))
    }
}

/// Validate one raw record.
///
/// The hash is taken from the explicit `hash` field first, then from the
/// `magnet` URI. Whatever the source, it must pass
/// [`magnet::normalize_hash`] to become an entry.
fn parse_record(index: usize, record: BackupRecord) -> ParsedRecord {
    let display_name = record.filename;

    let raw_hash = match (&record.hash, &record.magnet) {
        (Some(hash), _) => hash.as_str(),
        (None, Some(uri)) => match magnet::extract_hash_from_uri(uri) {
            Some(hash) => hash,
            None => {
                return ParsedRecord::Invalid(MalformedRecord {
                    index,
                    display_name,
                    reason: "magnet URI has no btih hash".to_string(),
                });
            }
        },
        (None, None) => {
            return ParsedRecord::Invalid(MalformedRecord {
                index,
                display_name,
                reason: "record has no hash or magnet field".to_string(),
            });
        }
    };

    match magnet::normalize_hash(raw_hash) {
        Ok(hash) => ParsedRecord::Entry(MagnetEntry { hash, display_name }),
        Err(e) => ParsedRecord::Invalid(MalformedRecord {
            index,
            display_name,
            reason: e.to_string(),
        }),
    }
}
