//! Bounded retry with exponential backoff.
//!
//! One policy backs every remote call in a run: inventory pages and magnet
//! submissions alike. Backoff doubles per retry from the configured base
//! (5s, 10s, 20s with the defaults). The attempt counter is local to each
//! call; nothing is shared across entries.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::ApiError;

/// Retry policy for transient API failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries allowed after the initial attempt.
    pub max_retries: u32,
    /// Backoff before the first retry; doubles per subsequent retry.
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base: Duration::from_secs(5),
        }
    }
}

/// Run `op` until it succeeds, fails terminally, or exhausts the policy.
///
/// On success returns the value together with the number of retries that
/// preceded it (0 when the first attempt succeeded). Only
/// [transient](ApiError::is_transient) errors are retried; a terminal error
/// ends the loop immediately and is returned as-is, as is the last transient
/// error once `max_retries` is spent.
///
/// # Errors
///
/// Returns the terminal [`ApiError`], or the final transient one after
/// retries are exhausted.
pub async fn with_retries<T, F, Fut>(
    policy: &RetryPolicy,
    what: &str,
    mut op: F,
) -> std::result::Result<(T, u32), ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, ApiError>>,
{
    let mut retries: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok((value, retries)),
            Err(e) if e.is_transient() && retries < policy.max_retries => {
                let wait = policy.backoff_base * 2u32.pow(retries);
                warn!(
                    attempt = retries + 1,
                    max = policy.max_retries,
                    error = %e,
                    "{what} failed, retrying in {}s",
                    wait.as_secs()
                );
                tokio::time::sleep(wait).await;
                retries += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
