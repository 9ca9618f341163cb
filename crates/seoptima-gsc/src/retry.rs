//! Retry with exponential back-off and jitter for the Search Console client.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (network failures, 429, 5xx). Everything else is
//! returned immediately.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::GscError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - HTTP 429 and 5xx responses.
///
/// **Not retriable:**
/// - Any other [`GscError::Api`] status (auth, permission, bad request).
/// - [`GscError::Deserialize`], [`GscError::InvalidBaseUrl`],
///   [`GscError::Resolve`].
pub(crate) fn is_retriable(err: &GscError) -> bool {
    match err {
        GscError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        GscError::Api { status, .. } => *status == 429 || (500..600).contains(status),
        GscError::Deserialize { .. } | GscError::InvalidBaseUrl { .. } | GscError::Resolve(_) => {
            false
        }
    }
}

/// Longest sleep between attempts, before jitter.
const MAX_DELAY: Duration = Duration::from_secs(60);

/// Jitter scales each delay by a factor in `[1 - JITTER, 1 + JITTER]`.
const JITTER: f64 = 0.25;

/// Sleep before retry number `retry` (1-based): `base_ms` doubled for each
/// earlier retry, capped at [`MAX_DELAY`], then scaled by `jitter`.
fn backoff_delay(retry: u32, base_ms: u64, jitter: f64) -> Duration {
    let doublings = retry.saturating_sub(1).min(16);
    let nominal = Duration::from_millis(base_ms.saturating_mul(1 << doublings)).min(MAX_DELAY);
    nominal.mul_f64(jitter.clamp(1.0 - JITTER, 1.0 + JITTER))
}

/// Runs `operation`, retrying transient errors up to `max_retries` times.
///
/// With `backoff_base_ms = 1_000` the sleeps are roughly 1 s, 2 s, 4 s, ...
/// (each ±25 %), never more than 75 s. Non-retriable errors and the error
/// from the final attempt are returned as-is.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, GscError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GscError>>,
{
    let mut retries = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if retries < max_retries && is_retriable(&err) => err,
            Err(err) => return Err(err),
        };
        retries += 1;

        let jitter = rand::rng().random_range(1.0 - JITTER..=1.0 + JITTER);
        let delay = backoff_delay(retries, backoff_base_ms, jitter);
        tracing::warn!(
            retry = retries,
            max_retries,
            delay = ?delay,
            error = %err,
            "Search Console transient error, retrying after back-off"
        );
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn api_error(status: u16) -> GscError {
        GscError::Api {
            status,
            context: "test".to_owned(),
            message: "boom".to_owned(),
        }
    }

    #[test]
    fn server_errors_and_rate_limits_are_retriable() {
        assert!(is_retriable(&api_error(500)));
        assert!(is_retriable(&api_error(503)));
        assert!(is_retriable(&api_error(429)));
    }

    #[test]
    fn client_errors_are_not_retriable() {
        assert!(!is_retriable(&api_error(400)));
        assert!(!is_retriable(&api_error(401)));
        assert!(!is_retriable(&api_error(403)));
    }

    #[test]
    fn resolve_errors_are_not_retriable() {
        assert!(!is_retriable(&GscError::Resolve(
            seoptima_core::ResolveError::NoVerifiedProperties
        )));
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        let src = serde_json::from_str::<()>("invalid").unwrap_err();
        assert!(!is_retriable(&GscError::Deserialize {
            context: "test".to_owned(),
            source: src,
        }));
    }

    #[test]
    fn backoff_doubles_per_retry() {
        assert_eq!(backoff_delay(1, 1_000, 1.0), Duration::from_millis(1_000));
        assert_eq!(backoff_delay(2, 1_000, 1.0), Duration::from_millis(2_000));
        assert_eq!(backoff_delay(3, 1_000, 1.0), Duration::from_millis(4_000));
    }

    #[test]
    fn backoff_is_capped_before_jitter() {
        assert_eq!(backoff_delay(7, 1_000, 1.0), MAX_DELAY);
        assert_eq!(backoff_delay(40, 1_000, 1.0), MAX_DELAY);
        assert_eq!(backoff_delay(3, u64::MAX, 1.0), MAX_DELAY);
        assert_eq!(backoff_delay(7, 1_000, 1.25), Duration::from_secs(75));
    }

    #[test]
    fn jitter_is_clamped_to_a_quarter_either_way() {
        assert_eq!(backoff_delay(1, 1_000, 0.75), Duration::from_millis(750));
        assert_eq!(backoff_delay(1, 1_000, 1.25), Duration::from_millis(1_250));
        assert_eq!(backoff_delay(1, 1_000, 0.0), Duration::from_millis(750));
        assert_eq!(backoff_delay(1, 1_000, 9.0), Duration::from_millis(1_250));
    }

    #[test]
    fn zero_base_means_no_sleep() {
        assert_eq!(backoff_delay(5, 0, 1.25), Duration::ZERO);
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, GscError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_server_errors_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err(api_error(503))
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(api_error(500))
            }
        })
        .await;
        assert!(matches!(result, Err(GscError::Api { status: 500, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_permission_denied() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(api_error(403))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "403 must not be retried");
        assert!(matches!(result, Err(GscError::Api { status: 403, .. })));
    }
}
