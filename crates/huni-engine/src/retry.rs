//! Retry and backoff for category queries.
//!
//! Transient failures (429, network errors, 5xx) are retried up to a
//! fixed budget. Rate-limit responses get a dedicated longer fixed
//! backoff — a "slow down" signal is not the same as a flaky link —
//! while other transient failures back off on a schedule that grows
//! with the attempt index. Non-retriable errors (malformed bodies,
//! client-side 4xx) are propagated immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::EngineError;

/// Retry budget and backoff tuning for one client.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub max_retries: u32,
    /// Generic backoff before retry n (0-based) is
    /// `backoff_base_secs * (n + 1)`: 2 s, 4 s, 6 s with the default base.
    pub backoff_base_secs: u64,
    /// Fixed backoff applied when the failure is a rate-limit response.
    pub rate_limit_backoff_secs: u64,
}

/// Returns `true` if `err` represents a transient condition worth
/// retrying after a backoff delay.
fn is_retriable(err: &EngineError) -> bool {
    match err {
        EngineError::RateLimited { .. } | EngineError::Http(_) => true,
        EngineError::UnexpectedStatus { status, .. } => *status >= 500,
        EngineError::Deserialize { .. } | EngineError::InvalidCoordinate { .. } => false,
    }
}

/// Executes `operation`, retrying transient errors per `policy`.
///
/// On a retriable error the function sleeps — the fixed rate-limit
/// backoff for [`EngineError::RateLimited`], the attempt-indexed
/// schedule otherwise — and tries again, up to `policy.max_retries`
/// additional attempts. The last error is returned once the budget is
/// exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, EngineError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, EngineError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= policy.max_retries {
                    return Err(err);
                }

                let delay_secs = if matches!(err, EngineError::RateLimited { .. }) {
                    policy.rate_limit_backoff_secs
                } else {
                    policy
                        .backoff_base_secs
                        .saturating_mul(u64::from(attempt) + 1)
                };
                tracing::warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_secs,
                    error = %err,
                    "transient fetch error — retrying after backoff"
                );
                tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                attempt += 1;
            }
        }
    }
}
