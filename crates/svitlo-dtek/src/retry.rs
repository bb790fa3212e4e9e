//! Fixed-delay retry around the whole GET+POST sequence.
//!
//! Unlike a per-request retry, the wrapped operation re-runs the page GET
//! as well, so cookies and a rotated CSRF token are re-acquired on every
//! attempt. Every error kind is retried uniformly: a `Protocol` or `Data`
//! failure can be caused by stale page state just as a network blip can.

use std::future::Future;
use std::time::Duration;

use crate::error::DtekError;

/// Runs `operation` up to `max_retries + 1` times, sleeping a fixed
/// `delay` between attempts. No exponential backoff: request volume is a
/// handful of fetches per day, so a constant delay keeps the worst-case
/// duration easy to reason about.
///
/// # Errors
///
/// After the final attempt the last error is returned unmodified in kind
/// and message.
pub async fn with_retry<T, F, Fut>(
    max_retries: u32,
    delay: Duration,
    mut operation: F,
) -> Result<T, DtekError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DtekError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= max_retries {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    max_retries,
                    error = %err,
                    "outage fetch attempt failed, retrying after fixed delay"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn data_err() -> DtekError {
        DtekError::Data {
            reason: "result=false".to_string(),
        }
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = with_retry(2, Duration::ZERO, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, DtekError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_then_succeeds() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = with_retry(2, Duration::ZERO, || {
            let cc = Arc::clone(&cc);
            async move {
                let n = cc.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(data_err())
                } else {
                    Ok::<u32, DtekError>(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn always_failing_op_runs_exactly_max_retries_plus_one_times() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = with_retry(2, Duration::ZERO, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, DtekError>(data_err())
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
        assert!(
            matches!(result, Err(DtekError::Data { ref reason }) if reason == "result=false"),
            "last error must be re-raised unmodified, got: {result:?}"
        );
    }

    #[tokio::test]
    async fn zero_retries_means_single_attempt() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let _ = with_retry(0, Duration::ZERO, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, DtekError>(data_err())
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }
}
