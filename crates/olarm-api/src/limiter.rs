// Per-credential rate limiting for the Olarm API.
//
// The vendor throttles per API key, and several physical panels may poll
// under one key, so exactly one `RateLimiter` exists per credential and is
// shared by `Arc` across every client built from it. The `LimiterRegistry`
// owns that mapping explicitly -- no hidden globals.
//
// The limiter itself is a pure scheduling state machine: minimum spacing
// between requests, exponential backoff after rate-limit hits, and a
// consecutive-hit circuit breaker that skips the rest of a poll cycle.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::auth::Credential;

/// Minimum spacing between any two requests under one credential.
pub const MIN_REQUEST_GAP: Duration = Duration::from_secs(2);

/// First backoff window after a rate-limit hit, in seconds.
pub const BACKOFF_BASE_SECS: u64 = 60;

/// Backoff ceiling, in seconds.
pub const BACKOFF_MAX_SECS: u64 = 300;

/// After this many consecutive rate-limit hits, stop attempting requests
/// until the next cycle (or a success) resets the counter.
pub const MAX_CONSECUTIVE_RATE_LIMITS: u32 = 3;

#[derive(Debug, Default)]
struct LimiterState {
    last_request_at: Option<Instant>,
    backoff_until: Option<Instant>,
    consecutive_hits: u32,
}

/// Shared rate limiter for one credential.
///
/// All mutation happens under one mutex; the lock is never held across a
/// sleep, so waiting out a backoff window on one credential cannot stall
/// requests on another. `last_request_at` is only committed by the final
/// lock acquisition of [`acquire`](Self::acquire) -- a caller that abandons
/// an in-flight wait leaves no trace.
#[derive(Debug, Default)]
pub struct RateLimiter {
    state: Mutex<LimiterState>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until a request may be issued.
    ///
    /// Returns `false` without sleeping (and without touching any state)
    /// when the consecutive-hit breaker is open -- the caller should skip
    /// this cycle entirely. Returns `true` once the backoff window and the
    /// minimum inter-request gap have both elapsed.
    pub async fn acquire(&self) -> bool {
        loop {
            let wait = {
                let mut state = self.state.lock().expect("limiter mutex poisoned");

                if state.consecutive_hits >= MAX_CONSECUTIVE_RATE_LIMITS {
                    warn!(
                        hits = state.consecutive_hits,
                        "too many consecutive rate-limit responses, skipping until next cycle"
                    );
                    return false;
                }

                let now = Instant::now();

                if let Some(until) = state.backoff_until.filter(|&u| now < u) {
                    let remaining = until - now;
                    info!(wait_secs = remaining.as_secs(), "rate limited, waiting out backoff");
                    Some(remaining)
                } else if let Some(gap) = state
                    .last_request_at
                    .map(|last| now.saturating_duration_since(last))
                    .filter(|&elapsed| elapsed < MIN_REQUEST_GAP)
                {
                    Some(MIN_REQUEST_GAP - gap)
                } else {
                    // Slot is ours: commit in the same lock acquisition that
                    // observed it free.
                    state.last_request_at = Some(now);
                    return true;
                }
            };

            if let Some(duration) = wait {
                tokio::time::sleep(duration).await;
            }
        }
    }

    /// Record a usable response. Any 2xx, and well-understood non-retryable
    /// errors like a 404 on the actions endpoint, count here -- the limiter
    /// cares about transport-level throttling only.
    pub fn record_success(&self) {
        let mut state = self.state.lock().expect("limiter mutex poisoned");
        if state.consecutive_hits > 0 {
            debug!("rate-limit streak cleared by successful response");
        }
        state.consecutive_hits = 0;
    }

    /// Record a rate-limit hit (HTTP 429 or the text-body equivalent) and
    /// open an exponentially growing backoff window.
    pub fn record_rate_limited(&self) {
        let mut state = self.state.lock().expect("limiter mutex poisoned");
        state.consecutive_hits += 1;

        let exponent = (state.consecutive_hits - 1).min(8);
        let backoff_secs = (BACKOFF_BASE_SECS << exponent).min(BACKOFF_MAX_SECS);
        state.backoff_until = Some(Instant::now() + Duration::from_secs(backoff_secs));

        warn!(
            hits = state.consecutive_hits,
            backoff_secs, "rate limited by the Olarm API, backing off"
        );
    }

    /// Reset the consecutive-hit counter at a poll-cycle boundary.
    ///
    /// The backoff *window* is deliberately left intact: a cycle boundary
    /// during active backoff still waits the window out on wall-clock time.
    /// Only the breaker counter starts fresh, so one bad cycle cannot
    /// suppress every future cycle.
    pub fn reset_cycle(&self) {
        let mut state = self.state.lock().expect("limiter mutex poisoned");
        state.consecutive_hits = 0;
    }

    /// Current consecutive-hit count.
    pub fn consecutive_hits(&self) -> u32 {
        self.state.lock().expect("limiter mutex poisoned").consecutive_hits
    }

    /// Time left in the active backoff window, if any.
    pub fn backoff_remaining(&self) -> Option<Duration> {
        let state = self.state.lock().expect("limiter mutex poisoned");
        state
            .backoff_until
            .map(|until| until.saturating_duration_since(Instant::now()))
            .filter(|d| !d.is_zero())
    }

    #[cfg(test)]
    fn last_request_at(&self) -> Option<Instant> {
        self.state.lock().expect("limiter mutex poisoned").last_request_at
    }
}

/// Explicit credential → limiter mapping.
///
/// Owned by the [`Olarm`](crate::Olarm) factory and consulted whenever a
/// connection is opened, so two clients for the same key can never end up
/// with two limiters.
#[derive(Debug, Default)]
pub struct LimiterRegistry {
    inner: Mutex<HashMap<String, Arc<RateLimiter>>>,
}

impl LimiterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared limiter for `credential`, creating it on first use.
    pub fn limiter_for(&self, credential: &Credential) -> Arc<RateLimiter> {
        let mut map = self.inner.lock().expect("registry mutex poisoned");
        Arc::clone(map.entry(credential.fingerprint()).or_default())
    }
}
