use crate::BatchError;
use std::time::Duration;

/// Retry budget and backoff schedule for one task.
///
/// # Fields
/// - `max_attempts`: Total invocations permitted; `0` means run once with no retry
/// - `base_delay`: Wait before the first retry
/// - `exp_factor`: Multiplier applied to the wait for each further retry
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub exp_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            base_delay: Duration::from_millis(500),
            exp_factor: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, exp_factor: f64) -> Self {
        Self {
            max_attempts,
            base_delay,
            exp_factor,
        }
    }

    /// Upper bound on how many times the operation is invoked.
    pub fn max_invocations(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay before the retry that follows failure number `attempt` (1-based).
    ///
    /// Computes `base_delay * exp_factor^(attempt - 1)`. A negative or NaN
    /// product means no wait; a positive one too large for `Duration`
    /// saturates at `Duration::MAX`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.base_delay.as_secs_f64() * self.exp_factor.powi(exponent);
        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    pub fn validate(&self) -> Result<(), BatchError> {
        if !self.exp_factor.is_finite() || self.exp_factor < 0.0 {
            return Err(BatchError::InvalidArgument {
                name: "exp_factor",
                reason: "must be a finite, non-negative number",
            });
        }
        Ok(())
    }
}
