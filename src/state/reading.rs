//! Last-known-good feed values with their fetch time.

use std::time::{Duration, Instant};

/// A value together with when it was fetched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading<T> {
    pub value: T,
    pub fetched_at: Instant,
}

impl<T> Reading<T> {
    /// Wraps a value fetched just now.
    pub fn now(value: T) -> Self {
        Self::at(value, Instant::now())
    }

    pub fn at(value: T, fetched_at: Instant) -> Self {
        Self { value, fetched_at }
    }

    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    /// A reading is stale once it has missed two refresh cycles.
    pub fn is_stale(&self, refresh: Duration) -> bool {
        self.age() > refresh.saturating_mul(2)
    }
}

/// Short human age: `12s`, `5m`, `2h`.
#[must_use]
pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else {
        format!("{}h", secs / 3600)
    }
}
