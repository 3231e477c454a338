//! Artificial latency with cancellation.
//!
//! Fraud checks and chat replies are revealed after a fixed delay.
//! A `Delayed` holds its value and a deadline. The wait races the
//! deadline against a cancellation token.
//!
//! RULE: scheduling never needs a runtime; only `wait()` does.
//! Dropping a `Delayed` cancels it, so a panel that is torn down never
//! receives a late result.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Roughly thirty years.
const FAR_FUTURE_SECS: u64 = 86_400 * 365 * 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatencyConfig {
    pub check_delay_ms: u64,
    pub reply_delay_ms: u64,
}

impl LatencyConfig {
    pub fn instant() -> Self {
        Self { check_delay_ms: 0, reply_delay_ms: 0 }
    }

    pub fn check_delay(&self) -> Duration {
        Duration::from_millis(self.check_delay_ms)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self { check_delay_ms: 1500, reply_delay_ms: 1000 }
    }
}

/// A value that becomes available after a delay, unless cancelled first.
///
/// Scheduling only records a deadline, so it works outside a runtime.
/// The wait itself happens in `wait()`.
pub struct Delayed<T> {
    cancel:   CancellationToken,
    deadline: Instant,
    value:    Option<T>,
}

impl<T> Delayed<T> {
    /// Schedule `value` to be revealed after `delay`.
    pub fn schedule(delay: Duration, value: T) -> Self {
        Self {
            cancel:   CancellationToken::new(),
            deadline: deadline_after(delay),
            value:    Some(value),
        }
    }

    /// Wait for the deadline. `None` if cancelled first.
    pub async fn wait(mut self) -> Option<T> {
        if self.cancel.is_cancelled() {
            return None;
        }
        if Instant::now() >= self.deadline {
            return self.value.take();
        }

        let token = self.cancel.clone();
        tokio::select! {
            biased;
            _ = token.cancelled() => None,
            _ = tokio::time::sleep_until(self.deadline) => self.value.take(),
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// True once the value is ready to be taken without waiting.
    pub fn is_elapsed(&self) -> bool {
        self.value.is_some() && !self.is_cancelled() && Instant::now() >= self.deadline
    }
}

/// `now + delay`, clamped to a far-future deadline when that overflows.
fn deadline_after(delay: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(delay)
        .unwrap_or_else(|| now + Duration::from_secs(FAR_FUTURE_SECS))
}

impl<T> Drop for Delayed<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
