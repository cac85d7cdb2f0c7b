//! Per-client sliding-window admission control.
//!
//! Each client key owns the timestamps of its admitted requests inside the
//! trailing window. A request is admitted while fewer than `capacity`
//! timestamps remain after pruning. This behaves like a token bucket of
//! `capacity` tokens that starts full and refills over `window`.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed { remaining: usize },
    Denied { retry_after: Duration },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allowed { .. })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateLimitConfigError {
    #[error("rate limit capacity must be at least 1")]
    ZeroCapacity,

    #[error("rate limit window must be non-zero")]
    ZeroWindow,

    #[error("rate limit max clients must be at least 1")]
    ZeroMaxClients,
}

/// Admitted request timestamps for one client, oldest first.
#[derive(Debug, Default)]
struct ClientWindow {
    admitted: VecDeque<Instant>,
}

impl ClientWindow {
    /// Drop timestamps older than `cutoff`.
    fn prune(&mut self, cutoff: Option<Instant>) {
        let Some(cutoff) = cutoff else { return };
        while let Some(front) = self.admitted.front() {
            if *front < cutoff {
                self.admitted.pop_front();
            } else {
                break;
            }
        }
    }
}

/// Process-wide limiter keyed by client identifier.
///
/// The prune/check/record sequence for a key runs while holding that key's
/// shard write lock, so concurrent requests from one client can never be
/// admitted beyond capacity. The number of tracked keys is bounded by
/// `max_clients`; idle keys are removed by [`RateLimiter::sweep`].
#[derive(Debug)]
pub struct RateLimiter {
    clients: DashMap<String, ClientWindow>,
    capacity: usize,
    window: Duration,
    max_clients: usize,
}

impl RateLimiter {
    pub fn new(
        capacity: usize,
        window: Duration,
        max_clients: usize,
    ) -> Result<Self, RateLimitConfigError> {
        if capacity == 0 {
            return Err(RateLimitConfigError::ZeroCapacity);
        }
        if window.is_zero() {
            return Err(RateLimitConfigError::ZeroWindow);
        }
        if max_clients == 0 {
            return Err(RateLimitConfigError::ZeroMaxClients);
        }

        Ok(Self {
            clients: DashMap::new(),
            capacity,
            window,
            max_clients,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Decide whether a request from `client_id` arriving at `now` is admitted.
    /// Denied requests do not consume a slot.
    pub fn admit(&self, client_id: &str, now: Instant) -> Admission {
        if !self.clients.contains_key(client_id) && self.clients.len() >= self.max_clients {
            let evicted = self.sweep(now);
            if self.clients.len() >= self.max_clients {
                tracing::warn!(
                    client = %client_id,
                    tracked = self.clients.len(),
                    max_clients = self.max_clients,
                    evicted,
                    "Rate limiter full: rejecting new client"
                );
                return Admission::Denied {
                    retry_after: self.window,
                };
            }
        }

        let cutoff = now.checked_sub(self.window);
        let mut window = self.clients.entry(client_id.to_owned()).or_default();

        window.prune(cutoff);

        if window.admitted.len() < self.capacity {
            window.admitted.push_back(now);
            Admission::Allowed {
                remaining: self.capacity - window.admitted.len(),
            }
        } else {
            let retry_after = window
                .admitted
                .front()
                .map(|oldest| (*oldest + self.window).saturating_duration_since(now))
                .unwrap_or(self.window);
            tracing::debug!(
                client = %client_id,
                retry_after_ms = retry_after.as_millis() as u64,
                "Rate limiter: request denied"
            );
            Admission::Denied { retry_after }
        }
    }

    /// Remove every client whose window is empty at `now`.
    /// Returns the number of evicted clients.
    pub fn sweep(&self, now: Instant) -> usize {
        let cutoff = now.checked_sub(self.window);
        let before = self.clients.len();
        self.clients.retain(|_, window| {
            window.prune(cutoff);
            !window.admitted.is_empty()
        });
        before.saturating_sub(self.clients.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }
}
