//! Run configuration.
//!
//! Everything a run needs (API key, endpoints, pacing, mode flags) is
//! resolved once in the command handler into an immutable [`Config`] and
//! passed down explicitly. Components never read environment variables
//! themselves; flag/env fallbacks are declared on the clap definitions.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::error::{Error, Result};
use crate::sync::SyncSettings;

/// Default backup file name, matching the DMM export default.
pub const DEFAULT_BACKUP_FILE: &str = "dmm-backup.json";

/// Immutable configuration for one sync run.
#[derive(Debug, Clone)]
pub struct Config {
    /// TorBox account API key.
    pub api_key: String,
    /// TorBox API base URL.
    pub base_url: String,
    /// Path to the DMM backup file.
    pub backup_file: PathBuf,
    /// Mode, pacing and retry knobs for the sync engine.
    pub sync: SyncSettings,
}

/// Validate an API key candidate from flag or environment.
///
/// # Errors
///
/// Returns a config error when no non-empty key was supplied.
pub fn require_api_key(candidate: Option<&str>) -> Result<String> {
    candidate
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| Error::Config("no API key provided".to_string()))
}

/// Timestamped run-log filename: `torbox_sync_YYYYMMDD_HHMMSS.log`.
#[must_use]
pub fn run_log_filename(now: &DateTime<Local>) -> String {
    format!("torbox_sync_{}.log", now.format("%Y%m%d_%H%M%S"))
}
