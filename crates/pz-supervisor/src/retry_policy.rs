use crate::{SupervisionError, SupervisorResult};

use std::time::Duration;

/// Bound on how long readiness polling may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    interval_ms: u64,
}

impl RetryPolicy {
    /// Both values must be positive.
    pub fn new(max_attempts: u32, interval_ms: u64) -> SupervisorResult<Self> {
        if max_attempts == 0 {
            return Err(SupervisionError::invalid_policy("max_attempts must be >= 1"));
        }
        if interval_ms == 0 {
            return Err(SupervisionError::invalid_policy("interval_ms must be >= 1"));
        }

        Ok(Self {
            max_attempts,
            interval_ms,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Upper bound on the time spent sleeping between attempts.
    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.interval_ms.saturating_mul(u64::from(self.max_attempts)))
    }
}
