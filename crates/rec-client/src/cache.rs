//! Time-bounded cache for the `/stats` snapshot.
//!
//! The cache is an explicit `(value, fetched_at)` pair checked against a
//! fixed TTL when read. It is invalidated only by elapsed time.

use std::time::{Duration, Instant};

use crate::types::StatsResponse;

/// How long a stats snapshot stays valid.
pub const STATS_TTL: Duration = Duration::from_secs(60);

/// Source of "now" for cache expiry.
///
/// Production code uses [`SystemClock`]; tests substitute a clock they can
/// advance by hand.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Monotonic wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Single-entry cache holding the outcome of the last stats fetch.
///
/// A failed fetch is stored as `None` and served for the full TTL, the
/// same as a snapshot.
#[derive(Debug, Clone)]
pub struct StatsCache {
    entry: Option<(Option<StatsResponse>, Instant)>,
    ttl: Duration,
}

impl StatsCache {
    pub fn new(ttl: Duration) -> Self {
        Self { entry: None, ttl }
    }

    /// The cached outcome if it was fetched less than `ttl` before `now`.
    ///
    /// The outer `Option` is hit/miss; the inner one is the stored outcome.
    pub fn get(&self, now: Instant) -> Option<Option<StatsResponse>> {
        let (stats, fetched_at) = self.entry.as_ref()?;
        if now.saturating_duration_since(*fetched_at) < self.ttl {
            Some(*stats)
        } else {
            None
        }
    }

    pub fn store(&mut self, stats: Option<StatsResponse>, fetched_at: Instant) {
        self.entry = Some((stats, fetched_at));
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new(STATS_TTL)
    }
}
