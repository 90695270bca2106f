//! Bounded fixed-window rate limiter for ticket creation.
//!
//! State is in-process only and resets on restart; the window parameters
//! come from each guild's ticket configuration at call time. The limiter is
//! constructed once during startup and handed to both the bot handler and
//! the REST state, so the two surfaces share one set of windows.

use chrono::Duration;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

/// Per-guild creation limit: at most `max` tickets per `window`.
#[derive(Clone, Copy, Debug)]
pub struct RateLimitPolicy {
    pub max: u32,
    pub window: std::time::Duration,
}

impl RateLimitPolicy {
    /// Builds a policy from the stored config columns. Non-positive values
    /// disable the dimension they control (unlimited / zero-length window).
    pub fn from_config(max: i32, window_minutes: i32) -> Self {
        Self {
            max: max.max(0) as u32,
            window: Duration::minutes(window_minutes.max(0) as i64)
                .to_std()
                .unwrap_or_default(),
        }
    }
}

struct Window {
    expires_at: Instant,
    count: u32,
}

/// Fixed-window counter keyed by user id, with a hard entry bound.
///
/// Expired windows are evicted on every access; when the map is full the
/// entry closest to expiry is dropped to make room. Dropping a live window
/// forgives at most one user's partial count, which is acceptable for an
/// advisory limit and keeps memory bounded under sustained load.
pub struct FixedWindowLimiter {
    capacity: usize,
    windows: Mutex<HashMap<u64, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Attempts to record one ticket creation for `key` under `policy`.
    ///
    /// # Returns
    /// - `true` - The creation is within the window limit and was counted
    /// - `false` - The user has exhausted the window; try again after it
    ///   elapses
    pub fn try_acquire(&self, key: u64, policy: RateLimitPolicy) -> bool {
        self.try_acquire_at(key, policy, Instant::now())
    }

    /// Clock-explicit variant of [`try_acquire`](Self::try_acquire).
    pub fn try_acquire_at(&self, key: u64, policy: RateLimitPolicy, now: Instant) -> bool {
        if policy.max == 0 || policy.window.is_zero() {
            return true;
        }

        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        windows.retain(|_, w| w.expires_at > now);

        if let Some(window) = windows.get_mut(&key) {
            if window.count >= policy.max {
                return false;
            }
            window.count += 1;
            return true;
        }

        if windows.len() >= self.capacity {
            let oldest = windows
                .iter()
                .min_by_key(|(_, w)| w.expires_at)
                .map(|(k, _)| *k);
            if let Some(oldest) = oldest {
                windows.remove(&oldest);
            }
        }

        windows.insert(
            key,
            Window {
                expires_at: now + policy.window,
                count: 1,
            },
        );

        true
    }

    /// Number of live windows, for diagnostics.
    pub fn len(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn policy(max: u32, window_secs: u64) -> RateLimitPolicy {
        RateLimitPolicy {
            max,
            window: Duration::from_secs(window_secs),
        }
    }

    #[test]
    fn allows_up_to_max_within_window() {
        let limiter = FixedWindowLimiter::new(16);
        let now = Instant::now();

        for _ in 0..3 {
            assert!(limiter.try_acquire_at(1, policy(3, 600), now));
        }
        assert!(!limiter.try_acquire_at(1, policy(3, 600), now));
    }

    #[test]
    fn rejects_until_window_elapses() {
        let limiter = FixedWindowLimiter::new(16);
        let now = Instant::now();
        let p = policy(2, 600);

        assert!(limiter.try_acquire_at(1, p, now));
        assert!(limiter.try_acquire_at(1, p, now));
        assert!(!limiter.try_acquire_at(1, p, now + Duration::from_secs(599)));

        // A fresh window opens once the old one expires.
        assert!(limiter.try_acquire_at(1, p, now + Duration::from_secs(601)));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = FixedWindowLimiter::new(16);
        let now = Instant::now();
        let p = policy(1, 600);

        assert!(limiter.try_acquire_at(1, p, now));
        assert!(limiter.try_acquire_at(2, p, now));
        assert!(!limiter.try_acquire_at(1, p, now));
    }

    #[test]
    fn zero_max_disables_limiting() {
        let limiter = FixedWindowLimiter::new(16);
        let now = Instant::now();

        for _ in 0..100 {
            assert!(limiter.try_acquire_at(1, policy(0, 600), now));
        }
    }

    #[test]
    fn evicts_expired_windows_on_access() {
        let limiter = FixedWindowLimiter::new(16);
        let now = Instant::now();
        let p = policy(1, 60);

        for key in 0..8 {
            assert!(limiter.try_acquire_at(key, p, now));
        }
        assert_eq!(limiter.len(), 8);

        limiter.try_acquire_at(99, p, now + Duration::from_secs(61));
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn never_exceeds_capacity() {
        let limiter = FixedWindowLimiter::new(4);
        let now = Instant::now();
        let p = policy(5, 600);

        for key in 0..32 {
            limiter.try_acquire_at(key, p, now);
        }
        assert!(limiter.len() <= 4);
    }
}
