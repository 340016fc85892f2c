//! Time source abstraction for token timestamps.
//!
//! Issuance measures `exp` from "now" (unless the caller supplies `iat`) and
//! verification compares against "now", so both go through a `TimeSource`.
//! Production uses the system clock; tests use a simulated clock and advance it
//! explicitly instead of sleeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Abstraction over time operations.
pub trait TimeSource {
    /// Get the current time in milliseconds since Unix epoch.
    fn now_ms(&self) -> u64;

    /// Get the current time in whole seconds since Unix epoch (floored).
    fn now_secs(&self) -> u64 {
        self.now_ms() / 1000
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Real time source using system clock.
///
/// This is the default implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    #[allow(clippy::cast_possible_truncation)] // u64 milliseconds outlast any real clock
    fn now_ms(&self) -> u64 {
        // A clock before 1970 is treated as the epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_millis() as u64)
    }
}

/// A manually driven time source.
///
/// Time only moves when told to. Backed by an atomic so a single instance can
/// be shared by a codec that is used from several threads at once.
///
/// # Example
///
/// ```
/// use tokens::time::{SimulatedTimeSource, TimeSource};
///
/// let time = SimulatedTimeSource::new(1000);
/// assert_eq!(time.now_ms(), 1000);
///
/// time.advance(100);
/// assert_eq!(time.now_ms(), 1100);
///
/// time.set(5000);
/// assert_eq!(time.now_secs(), 5);
/// ```
#[derive(Debug)]
pub struct SimulatedTimeSource {
    current_time_ms: AtomicU64,
}

impl SimulatedTimeSource {
    /// Create a new simulated time source with the given initial time.
    #[must_use]
    pub const fn new(initial_time_ms: u64) -> Self {
        Self {
            current_time_ms: AtomicU64::new(initial_time_ms),
        }
    }

    /// Start at `1_700_000_000_000` (approximately November 2023).
    #[must_use]
    pub const fn default_start() -> Self {
        Self::new(1_700_000_000_000)
    }

    /// Advance time by the given number of milliseconds.
    ///
    /// Time saturates at `u64::MAX` if overflow would occur.
    pub fn advance(&self, ms: u64) {
        // fetch_update only fails when the closure returns None, which it never does.
        let _ = self
            .current_time_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(current.saturating_add(ms))
            });
    }

    /// Set the current time to a specific value. May move time backwards.
    pub fn set(&self, time_ms: u64) {
        self.current_time_ms.store(time_ms, Ordering::SeqCst);
    }
}

impl Default for SimulatedTimeSource {
    fn default() -> Self {
        Self::default_start()
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now_ms(&self) -> u64 {
        self.current_time_ms.load(Ordering::SeqCst)
    }
}
