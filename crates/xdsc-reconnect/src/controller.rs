use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::ReconnectError;

/// Exponential-backoff reconnect controller (§4.1, component A).
///
/// Unlike a shared store, this type is meant to be owned by a single
/// reconnect-supervisor task (mirroring the teacher's private, per-task
/// `Backoff` in `discord_proxy/backoff.rs`) — callers needing to read the
/// delay from elsewhere should do so through the supervisor, not by sharing
/// this struct across tasks.
pub struct ReconnectController {
    initial: Duration,
    max: Duration,
    attempt: u32,
    current_delay: Duration,
    jitter: bool,
}

impl ReconnectController {
    /// Create a controller with the given initial delay and ceiling.
    #[must_use]
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max,
            attempt: 0,
            current_delay: initial,
            jitter: false,
        }
    }

    /// Opt into full-jitter delays (the teacher's default in
    /// `discord_proxy/backoff.rs`). This spec does not require jitter and
    /// choosing it trades away the exact `min(initial * 2^n, max)` sequence
    /// in §8 invariant 1 for real-world thundering-herd avoidance; the
    /// default constructor never applies it.
    #[must_use]
    pub fn with_jitter(mut self) -> Self {
        self.jitter = true;
        self
    }

    /// Compute the next delay, advance the attempt counter, and update the
    /// stored current delay (§4.1 `NextDelay`). Pure arithmetic — does not
    /// sleep.
    pub fn next_delay(&mut self) -> Duration {
        let base_ms = u64::try_from(self.initial.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max.as_millis()).unwrap_or(u64::MAX);
        let shifted = 1u64.checked_shl(self.attempt).unwrap_or(u64::MAX);
        let exp_ms = base_ms.saturating_mul(shifted);
        let capped_ms = exp_ms.min(max_ms);
        let delay_ms = if self.jitter && capped_ms > 0 {
            fastrand::u64(0..=capped_ms)
        } else {
            capped_ms
        };
        self.attempt = self.attempt.saturating_add(1);
        self.current_delay = Duration::from_millis(delay_ms);
        self.current_delay
    }

    /// Reset the attempt counter and current delay (§4.1 `Reset`), called
    /// after a successful connection.
    pub fn reset(&mut self) {
        self.attempt = 0;
        self.current_delay = self.initial;
    }

    /// The delay `next_delay` last returned, or `initial` if it has never
    /// been called (or was just reset).
    #[must_use]
    pub fn current_delay(&self) -> Duration {
        self.current_delay
    }

    /// The number of times `next_delay` has been called since construction
    /// or the last `reset`.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Compute the next delay and sleep for it, or return early if
    /// `cancellation` fires first (§4.1 `WaitWithContext`, §5 "the sleep
    /// inside `WaitWithContext`" suspension point).
    ///
    /// # Errors
    ///
    /// Returns [`ReconnectError::Cancelled`] if `cancellation` fires before
    /// the delay elapses.
    pub async fn wait_with_context(
        &mut self,
        cancellation: &CancellationToken,
    ) -> Result<(), ReconnectError> {
        let delay = self.next_delay();
        debug!(delay_ms = delay.as_millis(), attempt = self.attempt, "reconnect backoff");
        tokio::select! {
            () = tokio::time::sleep(delay) => Ok(()),
            () = cancellation.cancelled() => Err(ReconnectError::Cancelled),
        }
    }
}
