//! Import command implementation.
//!
//! Resolves the run configuration, loads the backup, and hands off to the
//! sync engine. The engine itself is mode-agnostic; this handler only wires
//! configuration in and renders the summary out.

use std::time::Duration;

use tracing::{info, warn};

use crate::backup::Backup;
use crate::cli::ImportArgs;
use crate::config::{require_api_key, Config};
use crate::error::{Error, Result};
use crate::remote::{RetryPolicy, TorboxClient};
use crate::sync::{self, print_summary, RunSummary, SyncSettings};

/// Execute the import command.
pub fn execute(args: &ImportArgs, dry_run: bool, json: bool) -> Result<()> {
    let config = resolve_config(args, dry_run)?;

    if config.sync.dry_run {
        info!("dry-run mode: no changes will be made");
    }

    let backup = Backup::load(&config.backup_file)?;
    info!(
        records = backup.len(),
        file = %config.backup_file.display(),
        "loaded backup"
    );
    if backup.is_empty() {
        warn!("backup contains no records");
    }

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    let decisions = rt.block_on(async {
        let client = TorboxClient::new(&config.base_url, &config.api_key);
        sync::run(&client, backup, &config.sync).await
    })?;

    let summary = RunSummary::from_decisions(&decisions);

    if json {
        let output = serde_json::json!({
            "success": true,
            "dry_run": config.sync.dry_run,
            "summary": summary,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print_summary(&summary, config.sync.dry_run);
    }

    Ok(())
}

/// Assemble the immutable run configuration from CLI arguments.
fn resolve_config(args: &ImportArgs, dry_run: bool) -> Result<Config> {
    let api_key = require_api_key(args.api_key.as_deref())?;

    Ok(Config {
        api_key,
        base_url: args.base_url.clone(),
        backup_file: args.input_file.clone(),
        sync: SyncSettings {
            dry_run,
            request_delay: Duration::from_secs(args.delay),
            retry: RetryPolicy {
                max_retries: args.max_retries,
                ..RetryPolicy::default()
            },
        },
    })
}
