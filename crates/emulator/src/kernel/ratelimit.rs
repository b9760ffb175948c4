//! Burst/interval rate limiting for diagnostic messages.
//!
//! At most `burst` messages pass per `interval`. The window starts at the
//! first check and restarts at the first check after it expires, at which point
//! the number of suppressed messages is reported once. A limiter that another
//! thread is currently checking suppresses the message instead of waiting.

use std::sync::{Mutex, TryLockError};
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::RateLimitConfig;

#[derive(Debug, Default)]
struct Window {
    begin: Option<Instant>,
    printed: u32,
    missed: u32,
}

/// A burst/interval limiter.
#[derive(Debug)]
pub struct RateLimiter {
    name: &'static str,
    interval: Duration,
    burst: u32,
    window: Mutex<Window>,
}

impl RateLimiter {
    /// Creates a limiter.
    ///
    /// A zero `interval` disables limiting.
    pub fn new(name: &'static str, interval: Duration, burst: u32) -> Self {
        Self {
            name,
            interval,
            burst,
            window: Mutex::new(Window::default()),
        }
    }

    /// Creates a limiter from configuration.
    pub fn from_config(name: &'static str, config: &RateLimitConfig) -> Self {
        Self::new(name, Duration::from_millis(config.interval_ms), config.burst)
    }

    /// Returns `true` if a message may be emitted now.
    pub fn check(&self) -> bool {
        self.check_at(Instant::now())
    }

    /// Returns `true` if a message may be emitted at `now`.
    ///
    /// `now` must not go backwards between calls.
    pub fn check_at(&self, now: Instant) -> bool {
        if self.interval.is_zero() {
            return true;
        }
        let mut window = match self.window.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return false,
        };

        let begin = *window.begin.get_or_insert(now);
        if now.saturating_duration_since(begin) >= self.interval {
            if window.missed > 0 {
                info!(limiter = self.name, suppressed = window.missed, "callbacks suppressed");
            }
            *window = Window {
                begin: Some(now),
                ..Window::default()
            };
        }

        if window.printed < self.burst {
            window.printed += 1;
            true
        } else {
            window.missed += 1;
            false
        }
    }

    /// Messages suppressed in the current window.
    pub fn missed(&self) -> u32 {
        match self.window.try_lock() {
            Ok(guard) => guard.missed,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().missed,
            Err(TryLockError::WouldBlock) => 0,
        }
    }
}
