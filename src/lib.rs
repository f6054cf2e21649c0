//! TorBox sync CLI - import DMM magnet backups into TorBox
//!
//! This crate provides the core functionality for the `tbsync` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`backup`] - DMM backup file parsing
//! - [`magnet`] - Magnet entries and hash normalization
//! - [`remote`] - TorBox API client and retry policy
//! - [`sync`] - Reconciliation, submission driver, run summary
//! - [`config`] - Run configuration
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod magnet;
pub mod remote;
pub mod sync;

pub use error::{Error, Result};
