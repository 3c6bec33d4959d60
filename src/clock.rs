//! Wall-clock access behind a small trait so timings can be driven by hand in tests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Milliseconds since the Unix epoch, as read from a [`Clock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difference between two timestamps in milliseconds.
///
/// Signed: a start value taken from the future yields a negative duration
/// instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElapsedMillis(i64);

impl ElapsedMillis {
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for ElapsedMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Sub for Timestamp {
    type Output = ElapsedMillis;

    fn sub(self, rhs: Self) -> ElapsedMillis {
        ElapsedMillis(self.0.saturating_sub(rhs.0))
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Host wall clock. Subject to clock adjustments; not monotonic.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(chrono::Utc::now().timestamp_millis())
    }
}

/// Hand-driven clock. Clones share the same reading.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<AtomicI64>,
    step: i64,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Arc::new(AtomicI64::new(start.0)),
            step: 0,
        }
    }

    /// Every read returns the current value and then moves the clock forward by `step_ms`.
    pub fn with_step(start: Timestamp, step_ms: i64) -> Self {
        Self {
            step: step_ms,
            ..Self::new(start)
        }
    }

    pub fn set(&self, timestamp: Timestamp) {
        self.current.store(timestamp.0, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.current.fetch_add(millis, Ordering::SeqCst);
    }

    /// Current reading without consuming an auto-advance step.
    pub fn peek(&self) -> Timestamp {
        Timestamp(self.current.load(Ordering::SeqCst))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.current.fetch_add(self.step, Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_set_and_advance() {
        let clock = ManualClock::new(Timestamp::from_millis(1000));
        assert_eq!(clock.now(), Timestamp::from_millis(1000));

        clock.advance(500);
        assert_eq!(clock.now().as_millis(), 1500);

        clock.set(Timestamp::from_millis(42));
        assert_eq!(clock.now().as_millis(), 42);
    }

    #[test]
    fn test_manual_clock_step_moves_every_read() {
        let clock = ManualClock::with_step(Timestamp::from_millis(10), 5);
        assert_eq!(clock.now().as_millis(), 10);
        assert_eq!(clock.now().as_millis(), 15);
        assert_eq!(clock.peek().as_millis(), 20);
    }

    #[test]
    fn test_clones_share_reading() {
        let clock = ManualClock::new(Timestamp::from_millis(0));
        let shared = clock.clone();
        clock.advance(250);
        assert_eq!(shared.now().as_millis(), 250);

        let arc = Arc::new(shared);
        assert_eq!(arc.now().as_millis(), 250);
        assert_eq!((&clock).now().as_millis(), 250);
    }

    #[test]
    fn test_elapsed_sign() {
        let start = Timestamp::from_millis(2000);
        let end = Timestamp::from_millis(1500);
        let elapsed = end - start;
        assert_eq!(elapsed.as_millis(), -500);
        assert!(elapsed.is_negative());
        assert_eq!(elapsed.to_string(), "-500");
    }

    #[test]
    fn test_elapsed_saturates() {
        let elapsed = Timestamp::from_millis(1) - Timestamp::from_millis(i64::MIN);
        assert_eq!(elapsed.as_millis(), i64::MAX);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now().as_millis() > 1_577_836_800_000);
    }
}
