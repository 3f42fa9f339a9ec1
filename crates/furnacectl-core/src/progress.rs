//! Status polling for long-running provider operations
//!
//! Stack deletion and deployment rollout both finish minutes after the
//! request returns. This module blocks until a probed status reaches the
//! target label, emitting one progress event per poll tick so the CLI can
//! keep a human operator informed of liveness.

use crate::error::{CoreError, Result};
use std::time::{Duration, Instant};

/// Progress events emitted while waiting on a remote status transition
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Waiting has begun for the given target status
    Started { target: String },
    /// One poll tick observed a non-terminal status
    Polling { status: String, elapsed: Duration },
    /// Target status reached
    Completed { status: String },
    /// Terminal failure status observed
    Failed { status: String },
}

/// Callback type for progress updates
///
/// The CLI uses this to drive a spinner; tests use it to count ticks.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Poll a status probe until it reports the target label
///
/// * `target` - status label that means success (compared case-insensitively)
/// * `failure_states` - labels that mean the operation failed permanently
/// * `interval` - time between polls
/// * `timeout` - overall deadline; exceeding it yields [`CoreError::TaskTimeout`]
/// * `probe` - async status check; its errors propagate unchanged
/// * `on_progress` - optional callback, invoked once per non-terminal tick
///
/// Retry policy for the probe itself is delegated to the provider client;
/// this function only adds cadence, a deadline, and operator-visible
/// progress on top of it.
pub async fn wait_for_status<F, Fut>(
    target: &str,
    failure_states: &[&str],
    interval: Duration,
    timeout: Duration,
    mut probe: F,
    on_progress: Option<ProgressCallback>,
) -> Result<String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String>>,
{
    let start = Instant::now();

    emit(
        &on_progress,
        ProgressEvent::Started {
            target: target.to_string(),
        },
    );

    loop {
        let status = probe().await?;

        if status.eq_ignore_ascii_case(target) {
            emit(
                &on_progress,
                ProgressEvent::Completed {
                    status: status.clone(),
                },
            );
            return Ok(status);
        }

        if failure_states.iter().any(|f| status.eq_ignore_ascii_case(f)) {
            emit(
                &on_progress,
                ProgressEvent::Failed {
                    status: status.clone(),
                },
            );
            return Err(CoreError::TaskFailed(format!(
                "terminal status {status} while waiting for {target}"
            )));
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Err(CoreError::TaskTimeout(timeout));
        }

        emit(
            &on_progress,
            ProgressEvent::Polling {
                status,
                elapsed,
            },
        );

        tokio::time::sleep(interval).await;
    }
}

fn emit(callback: &Option<ProgressCallback>, event: ProgressEvent) {
    if let Some(cb) = callback {
        cb(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_callback(ticks: Arc<AtomicUsize>) -> ProgressCallback {
        Box::new(move |event| {
            if matches!(event, ProgressEvent::Polling { .. }) {
                ticks.fetch_add(1, Ordering::SeqCst);
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_after_target_with_expected_tick_count() {
        let probes = Arc::new(AtomicUsize::new(0));
        let ticks = Arc::new(AtomicUsize::new(0));

        let probes_in_probe = probes.clone();
        let status = wait_for_status(
            "SUCCEEDED",
            &["FAILED"],
            Duration::from_secs(1),
            Duration::from_secs(60),
            move || {
                let n = probes_in_probe.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 3 {
                        Ok("InProgress".to_string())
                    } else {
                        Ok("SUCCEEDED".to_string())
                    }
                }
            },
            Some(counting_callback(ticks.clone())),
        )
        .await
        .unwrap();

        assert_eq!(status, "SUCCEEDED");
        assert_eq!(probes.load(Ordering::SeqCst), 4, "exactly 4 probes");
        assert_eq!(ticks.load(Ordering::SeqCst), 3, "exactly 3 progress ticks");
    }

    #[tokio::test(start_paused = true)]
    async fn test_target_match_is_case_insensitive() {
        let status = wait_for_status(
            "succeeded",
            &[],
            Duration::from_secs(1),
            Duration::from_secs(10),
            || async { Ok("Succeeded".to_string()) },
            None,
        )
        .await
        .unwrap();
        assert_eq!(status, "Succeeded");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_state_is_terminal() {
        let err = wait_for_status(
            "SUCCEEDED",
            &["FAILED", "STOPPED"],
            Duration::from_secs(1),
            Duration::from_secs(10),
            || async { Ok("Stopped".to_string()) },
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CoreError::TaskFailed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_error_propagates() {
        let err = wait_for_status(
            "SUCCEEDED",
            &[],
            Duration::from_secs(1),
            Duration::from_secs(10),
            || async {
                Err(CoreError::Connection("connection refused".to_string()))
            },
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CoreError::Connection(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_yields_timeout() {
        let err: CoreError = wait_for_status(
            "SUCCEEDED",
            &[],
            Duration::from_secs(5),
            Duration::from_secs(12),
            || async { Ok("InProgress".to_string()) },
            None,
        )
        .await
        .unwrap_err();
        assert!(err.is_timeout());
    }
}
