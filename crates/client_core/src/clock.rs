//! Time source shared by every timer-driven state machine.
//!
//! Components never sleep. They record deadlines as offsets from the clock
//! origin and apply whatever became due when `tick` is called, so tests can
//! move time explicitly instead of waiting for it.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

pub trait Clock: Send + Sync {
    /// Monotonic time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

pub type SharedClock = Arc<dyn Clock>;

/// Hand-driven clock for tests and headless replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    elapsed_nanos: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed_nanos
            .fetch_add(saturating_nanos(by), Ordering::SeqCst);
    }

    pub fn advance_ms(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Moves to an absolute offset; going backwards is ignored.
    pub fn set(&self, at: Duration) {
        self.elapsed_nanos
            .fetch_max(saturating_nanos(at), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::SeqCst))
    }
}

/// Clock backed by tokio's time driver, so paused test runtimes control it.
#[derive(Debug, Clone)]
pub struct TokioClock {
    origin: tokio::time::Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }

    pub fn origin(&self) -> tokio::time::Instant {
        self.origin
    }

    pub fn instant_at(&self, offset: Duration) -> tokio::time::Instant {
        self.origin + offset
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

fn saturating_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "tests/clock_tests.rs"]
mod tests;
