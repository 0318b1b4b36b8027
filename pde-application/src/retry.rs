use std::{thread, time::Duration};

use super::*;

/// Bounded retries with a linearly growing backoff.
///
/// Only apply this to idempotent reads. Mutations
/// are never retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_backoff_ms: 120,
        }
    }
}

impl RetryPolicy {
    /// A single attempt without any retries.
    pub const fn never() -> Self {
        Self {
            max_attempts: 1,
            base_backoff_ms: 0,
        }
    }

    fn backoff(&self, attempt: usize) -> Duration {
        Duration::from_millis(self.base_backoff_ms.saturating_mul(attempt as u64))
    }
}

pub fn retry_read<T, F>(policy: &RetryPolicy, mut read: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match read() {
            Ok(res) => return Ok(res),
            Err(err) => {
                if !err.is_transient() || attempt >= policy.max_attempts {
                    return Err(err);
                }
                warn!(
                    "Read attempt {attempt} of {} failed: {err}",
                    policy.max_attempts
                );
            }
        }
        thread::sleep(policy.backoff(attempt));
    }
}
