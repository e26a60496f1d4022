//! Elapsed-time measurement around a kernel call

use std::time::{Duration, Instant};

/// Measures how long a closure takes to run
pub trait Clock {
    fn time<F: FnOnce()>(&self, f: F) -> Duration;
}

/// Wall clock backed by [`Instant`], which never goes backwards
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn time<F: FnOnce()>(&self, f: F) -> Duration {
        let start = Instant::now();
        f();
        start.elapsed()
    }
}
