//! Sleep abstraction so retry loops can be tested without delays.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub trait Sleeper: Send + Sync {
    fn sleep_sec(&self, seconds: u64);
}

/// Sleeper backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealSleeper;

impl RealSleeper {
    pub fn new() -> Self {
        Self
    }
}

impl Sleeper for RealSleeper {
    fn sleep_sec(&self, seconds: u64) {
        std::thread::sleep(Duration::from_secs(seconds));
    }
}

/// Returns immediately and records how long it was asked to sleep.
#[derive(Debug, Default)]
pub struct MockSleeper {
    calls: AtomicU64,
    total_seconds: AtomicU64,
}

impl MockSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds.load(Ordering::Relaxed)
    }
}

impl Sleeper for MockSleeper {
    fn sleep_sec(&self, seconds: u64) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.total_seconds.fetch_add(seconds, Ordering::Relaxed);
    }
}
