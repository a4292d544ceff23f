//! Tests for the retry policy and executor

#[cfg(test)]
mod tests {
    use crate::{
        cancel::CancelToken,
        observer::ProgressObserver,
        retry::{RetryExecutor, RetryPolicy, run_with_retry},
        BatchError, TaskError,
    };
    use std::fmt::Display;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::{Duration, Instant, sleep, timeout};

    /// Observer that records every scheduled retry delay
    #[derive(Default)]
    struct RecordingObserver {
        delays: Mutex<Vec<(u32, Duration)>>,
        exhausted: Mutex<Vec<String>>,
    }

    impl ProgressObserver for RecordingObserver {
        fn retry_scheduled(&self, _task: usize, attempt: u32, _max: u32, delay: Duration) {
            self.delays.lock().unwrap().push((attempt, delay));
        }

        fn attempts_exhausted(&self, _task: usize, _max: u32, error: &dyn Display) {
            self.exhausted.lock().unwrap().push(error.to_string());
        }
    }

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(500), 2.0)
    }

    #[test]
    fn test_default_policy_matches_documented_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 0);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
        assert_eq!(policy.exp_factor, 2.0);
        assert_eq!(policy.max_invocations(), 1);
    }

    #[test]
    fn test_delay_grows_exponentially() {
        let policy = policy(5);
        assert_eq!(policy.delay_for(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(4), Duration::from_millis(4000));
    }

    #[test]
    fn test_delay_with_fractional_factor() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1000), 1.5);
        assert_eq!(policy.delay_for(2), Duration::from_millis(1500));
    }

    #[test]
    fn test_delay_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::new(u32::MAX, Duration::from_secs(1), 10.0);
        assert_eq!(policy.delay_for(10_000), Duration::MAX);
    }

    #[test]
    fn test_negative_or_nan_delay_means_no_wait() {
        let negative = RetryPolicy::new(3, Duration::from_millis(500), -1.0);
        assert_eq!(negative.delay_for(1), Duration::from_millis(500));
        assert_eq!(negative.delay_for(2), Duration::ZERO);
        assert_eq!(negative.delay_for(3), Duration::from_millis(500));

        let nan = RetryPolicy::new(3, Duration::from_millis(500), f64::NAN);
        assert_eq!(nan.delay_for(2), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_factor_still_uses_every_attempt() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::from_millis(10), -1.0);

        let result = timeout(
            Duration::from_secs(2),
            run_with_retry(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err::<(), _>("down") }
                },
                &policy,
            ),
        )
        .await
        .expect("retries should finish without an endless backoff");

        assert_eq!(result, Err(TaskError::Failed("down")));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_validate_rejects_bad_factor() {
        for factor in [-1.0, f64::NAN, f64::INFINITY] {
            let policy = RetryPolicy::new(3, Duration::from_millis(10), factor);
            assert!(matches!(
                policy.validate(),
                Err(BatchError::InvalidArgument { name: "exp_factor", .. })
            ));
        }
        assert!(policy(3).validate().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_op_is_invoked_max_attempts_times() {
        for k in 1..=4 {
            let calls = AtomicU32::new(0);
            let result = run_with_retry(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err::<u32, _>("boom") }
                },
                &policy(k),
            )
            .await;

            assert_eq!(result, Err(TaskError::Failed("boom")));
            assert_eq!(calls.load(Ordering::SeqCst), k);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_invokes_once_without_delay() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result = run_with_retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<u32, _>("boom") }
            },
            &policy(0),
        )
        .await;

        assert_eq!(result, Err(TaskError::Failed("boom")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_passes_success_through() {
        let result = run_with_retry(|| async { Ok::<_, String>(42) }, &policy(0)).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);

        let result = run_with_retry(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { if n < 3 { Err("flaky") } else { Ok(n) } }
            },
            &policy(5),
        )
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_schedule_is_observed() {
        let observer = RecordingObserver::default();
        let policy = policy(4);
        let executor = RetryExecutor::new(&policy).with_observer(&observer);
        let start = Instant::now();

        let result = executor
            .run(7, || async { Err::<(), _>("down") })
            .await;

        assert_eq!(result, Err(TaskError::Failed("down")));
        assert_eq!(
            *observer.delays.lock().unwrap(),
            vec![
                (1, Duration::from_millis(500)),
                (2, Duration::from_millis(1000)),
                (3, Duration::from_millis(2000)),
            ]
        );
        assert_eq!(*observer.exhausted.lock().unwrap(), vec!["down".to_string()]);
        assert!(start.elapsed() >= Duration::from_millis(3500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_backoff_stops_retrying() {
        let calls = AtomicU32::new(0);
        let token = CancelToken::new();
        let policy = RetryPolicy::new(5, Duration::from_secs(10), 2.0);
        let executor = RetryExecutor::new(&policy).with_cancel(Some(&token));

        let run = executor.run(0, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>("down") }
        });
        let trigger = async {
            sleep(Duration::from_secs(1)).await;
            token.cancel();
        };
        let (result, ()) = tokio::join!(run, trigger);

        assert_eq!(result, Err(TaskError::Cancelled));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_token_skips_invocation() {
        let calls = AtomicU32::new(0);
        let token = CancelToken::new();
        token.cancel();
        let policy = policy(3);
        let executor = RetryExecutor::new(&policy).with_cancel(Some(&token));

        let result = executor
            .run(0, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, String>(1) }
            })
            .await;

        assert_eq!(result, Err(TaskError::Cancelled));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_in_flight_operation() {
        let token = CancelToken::new();
        let policy = policy(0);
        let executor = RetryExecutor::new(&policy).with_cancel(Some(&token));

        let run = executor.run(0, || async {
            sleep(Duration::from_secs(60)).await;
            Ok::<_, String>("late")
        });
        let trigger = async {
            sleep(Duration::from_millis(5)).await;
            token.cancel();
        };
        let start = Instant::now();
        let (result, ()) = tokio::join!(run, trigger);

        assert_eq!(result, Err(TaskError::Cancelled));
        assert!(start.elapsed() < Duration::from_secs(60));
    }
}
