//! Error types for the TorBox sync CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=config, 3=backup, 4=remote, 5=io)
//! - Retryability flags for scripted callers
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers
//!
//! Only errors that prevent establishing a trustworthy baseline are fatal:
//! an unreadable backup or an unreachable TorBox inventory. Per-entry
//! submission failures never become an `Error`; they are contained in the
//! run summary and the process still exits zero.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Config (exit 2)
    ConfigError,

    // Backup (exit 3)
    BackupUnreadable,

    // Remote (exit 4)
    RemoteUnavailable,

    // I/O (exit 5)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::ConfigError => "CONFIG_ERROR",
            Self::BackupUnreadable => "BACKUP_UNREADABLE",
            Self::RemoteUnavailable => "REMOTE_UNAVAILABLE",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-5).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::ConfigError => 2,
            Self::BackupUnreadable => 3,
            Self::RemoteUnavailable => 4,
            Self::IoError | Self::JsonError => 5,
        }
    }

    /// Whether re-running the same command may succeed without changes.
    ///
    /// True only for remote availability failures: the TorBox API being
    /// down is transient from the caller's point of view. Config and
    /// backup errors require the user to fix something first.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Fatal errors for a sync run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Backup file unreadable: {}: {message}", path.display())]
    BackupUnreadable { path: PathBuf, message: String },

    #[error("TorBox unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::BackupUnreadable { .. } => ErrorCode::BackupUnreadable,
            Self::RemoteUnavailable(_) => ErrorCode::RemoteUnavailable,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::BackupUnreadable { .. } => Some(
                "Expected a DMM backup: a JSON array of records with \
                 `hash` (or `magnet`) and optional `filename` fields."
                    .to_string(),
            ),

            Self::RemoteUnavailable(_) => Some(
                "The run aborted before submitting anything, so it is safe \
                 to retry once the TorBox API is reachable again."
                    .to_string(),
            ),

            Self::Config(msg) => {
                if msg.contains("API key") {
                    Some(
                        "Pass --api-key or set the TORBOX_API_KEY environment variable."
                            .to_string(),
                    )
                } else {
                    None
                }
            }

            Self::Io(_) | Self::Json(_) | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
