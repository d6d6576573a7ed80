//! Deadline timers driven by the event loop.
//!
//! Nothing here spawns threads or sleeps. The owner arms a timer with the
//! current `Instant` and later asks it how many times it fired by calling
//! [`Timer::poll`] from its tick handler. Dropping or cancelling the timer
//! guarantees it can no longer act on stale state.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timer {
    deadline: Option<Instant>,
    period: Option<Duration>,
}

impl Timer {
    pub const fn idle() -> Self {
        Self {
            deadline: None,
            period: None,
        }
    }

    /// Fire once, `delay` after `now`.
    pub fn once(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
        self.period = None;
    }

    /// Fire every `period`, first at `now + period`.
    pub fn every(&mut self, now: Instant, period: Duration) {
        let period = period.max(Duration::from_millis(1));
        self.deadline = Some(now + period);
        self.period = Some(period);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
        self.period = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Number of expirations since the last poll.
    ///
    /// A fire-once timer disarms itself after reporting `1`. A periodic
    /// timer reports every elapsed period and re-arms on the next one.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(deadline) = self.deadline else {
            return 0;
        };
        if now < deadline {
            return 0;
        }
        match self.period {
            None => {
                self.deadline = None;
                1
            }
            Some(period) => {
                let late = now.duration_since(deadline);
                let extra = (late.as_nanos() / period.as_nanos()).min(u32::MAX as u128 - 1) as u32;
                let fired = extra + 1;
                self.deadline = Some(deadline + period * fired);
                fired
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_fires_a_single_time() {
        let start = Instant::now();
        let mut t = Timer::idle();
        t.once(start, Duration::from_millis(150));
        assert_eq!(t.poll(start + Duration::from_millis(149)), 0);
        assert_eq!(t.poll(start + Duration::from_millis(150)), 1);
        assert!(!t.is_armed());
        assert_eq!(t.poll(start + Duration::from_secs(5)), 0);
    }

    #[test]
    fn every_counts_missed_periods() {
        let start = Instant::now();
        let mut t = Timer::idle();
        t.every(start, Duration::from_secs(1));
        assert_eq!(t.poll(start + Duration::from_millis(999)), 0);
        assert_eq!(t.poll(start + Duration::from_millis(3500)), 3);
        assert_eq!(t.deadline(), Some(start + Duration::from_secs(4)));
        assert_eq!(t.poll(start + Duration::from_secs(4)), 1);
    }

    #[test]
    fn cancel_disarms() {
        let start = Instant::now();
        let mut t = Timer::idle();
        t.every(start, Duration::from_secs(1));
        t.cancel();
        assert_eq!(t.poll(start + Duration::from_secs(10)), 0);
    }
}
