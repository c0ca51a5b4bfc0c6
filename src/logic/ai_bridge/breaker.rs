//! Circuit Breaker
//!
//! Cooldown timestamp shared by the adapter (writer) and the scheduler
//! (reader). A trip mid-sweep is observed from the next entry on.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;

pub struct CircuitBreaker {
    cooldown: Duration,
    cooldown_until: Mutex<Option<Instant>>,
    trips: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreakerStatus {
    pub open: bool,
    pub remaining_secs: u64,
    pub trips: u64,
}

impl CircuitBreaker {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            cooldown_until: Mutex::new(None),
            trips: AtomicU64::new(0),
        }
    }

    /// Suppress remote calls for one cooldown window from now
    pub fn trip(&self) {
        let until = Instant::now() + self.cooldown;
        *self.cooldown_until.lock() = Some(until);
        self.trips.fetch_add(1, Ordering::Relaxed);
        log::warn!("AI rate limit detected: pausing remote classification for {}s", self.cooldown.as_secs());
    }

    /// True while the cooldown has not elapsed
    pub fn is_open(&self) -> bool {
        self.remaining().is_some()
    }

    /// Time left in the cooldown window
    pub fn remaining(&self) -> Option<Duration> {
        let until = (*self.cooldown_until.lock())?;
        let now = Instant::now();
        (until > now).then(|| until - now)
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn trip_count(&self) -> u64 {
        self.trips.load(Ordering::Relaxed)
    }

    pub fn status(&self) -> BreakerStatus {
        let remaining = self.remaining();
        BreakerStatus {
            open: remaining.is_some(),
            remaining_secs: remaining.map(|d| d.as_secs()).unwrap_or(0),
            trips: self.trip_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_by_default() {
        let breaker = CircuitBreaker::new(Duration::from_secs(60));
        assert!(!breaker.is_open());
        assert_eq!(breaker.trip_count(), 0);
    }

    #[test]
    fn test_trip_opens_until_cooldown_elapses() {
        let breaker = CircuitBreaker::new(Duration::from_millis(80));
        breaker.trip();
        assert!(breaker.is_open());
        assert!(breaker.status().open);

        std::thread::sleep(Duration::from_millis(120));
        assert!(!breaker.is_open());
        assert_eq!(breaker.trip_count(), 1);
    }
}
