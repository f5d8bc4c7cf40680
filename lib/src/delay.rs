// SPDX-FileCopyrightText: 2026 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::CancelToken;
use embedded_hal::delay::DelayNs;
use std::thread;
use std::time::{Duration, Instant};

/// The default period below which [`ThreadDelay`] busy-waits.
pub const DEFAULT_SPIN_THRESHOLD: Duration = Duration::from_micros(100);

// the longest a cancellable sleep goes without checking its token
const SLEEP_SLICE: Duration = Duration::from_millis(10);

/// A best-effort blocking [`DelayNs`] for the calling thread.
///
/// Short delays busy-wait on the monotonic clock, as the scheduler cannot
/// wake a sleeping thread with microsecond precision. Longer delays sleep.
/// Neither compensates for scheduler jitter - the delay is at least as long
/// as requested, but may be longer.
///
/// Signals do not interrupt a sleep, so a delay given a [`CancelToken`]
/// sleeps in slices of at most 10ms and returns early once the token is
/// cancelled. Without a token, cancellation is only seen by the caller once
/// the full delay has elapsed.
#[derive(Clone, Debug)]
pub struct ThreadDelay {
    spin_threshold: Duration,
    cancel: Option<CancelToken>,
}

impl ThreadDelay {
    /// Create a delay using the [`DEFAULT_SPIN_THRESHOLD`].
    pub fn new() -> Self {
        ThreadDelay {
            spin_threshold: DEFAULT_SPIN_THRESHOLD,
            cancel: None,
        }
    }

    /// Cut sleeps short once `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Set the period at or below which delays busy-wait rather than sleep.
    ///
    /// A zero threshold always sleeps.
    pub fn with_spin_threshold(mut self, threshold: Duration) -> Self {
        self.spin_threshold = threshold;
        self
    }

    /// The period at or below which delays busy-wait.
    pub fn spin_threshold(&self) -> Duration {
        self.spin_threshold
    }

    fn wait(&self, period: Duration) {
        if period.is_zero() {
            return;
        }
        if period > self.spin_threshold {
            self.sleep(period);
            return;
        }
        let start = Instant::now();
        while start.elapsed() < period {
            std::hint::spin_loop();
        }
    }

    fn sleep(&self, period: Duration) {
        let Some(token) = &self.cancel else {
            thread::sleep(period);
            return;
        };
        let start = Instant::now();
        loop {
            if token.is_cancelled() {
                return;
            }
            let remaining = period.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                return;
            }
            thread::sleep(remaining.min(SLEEP_SLICE));
        }
    }
}

impl Default for ThreadDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.wait(Duration::from_nanos(ns.into()));
    }

    fn delay_us(&mut self, us: u32) {
        self.wait(Duration::from_micros(us.into()));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wait(Duration::from_millis(ms.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spins_at_least_requested() {
        let mut d = ThreadDelay::new();
        let start = Instant::now();
        d.delay_us(50);
        assert!(start.elapsed() >= Duration::from_micros(50));
    }

    #[test]
    fn sleeps_at_least_requested() {
        let mut d = ThreadDelay::new().with_spin_threshold(Duration::ZERO);
        assert_eq!(d.spin_threshold(), Duration::ZERO);
        let start = Instant::now();
        d.delay_ms(5);
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn cancelled_sleep_returns_early() {
        let token = CancelToken::new();
        let mut d = ThreadDelay::new().with_cancel(token.clone());
        let remote = token.clone();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });
        let start = Instant::now();
        d.delay_ms(60_000);
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(token.is_cancelled());
        canceller.join().unwrap();

        // already cancelled
        let start = Instant::now();
        d.delay_ms(60_000);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn uncancelled_sleep_runs_full_period() {
        let mut d = ThreadDelay::new().with_cancel(CancelToken::new());
        let start = Instant::now();
        d.delay_ms(35);
        assert!(start.elapsed() >= Duration::from_millis(35));
    }

    #[test]
    fn zero_delay_returns() {
        let mut d = ThreadDelay::default();
        d.delay_ns(0);
        d.delay_us(0);
    }
}
