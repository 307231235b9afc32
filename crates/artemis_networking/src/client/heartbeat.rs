//! Server liveness tracking.
//!
//! The monitor only sees timestamps; the caller decides which packets count
//! as liveness and turns the transitions into events. Each transition is
//! reported once: `check` returns true on the first timeout only, and
//! `on_heartbeat` returns true only for the first heartbeat after it.

use std::time::{Duration, Instant};

/// Tracks the last liveness packet against a timeout.
#[derive(Debug)]
pub struct HeartbeatMonitor {
    timeout: Duration,
    last: Option<Instant>,
    lost: bool,
}

impl HeartbeatMonitor {
    /// Creates an unarmed monitor. Nothing is reported until `reset`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            last: None,
            lost: false,
        }
    }

    /// Starts timing from `now` and clears any lost state.
    pub fn reset(&mut self, now: Instant) {
        self.last = Some(now);
        self.lost = false;
    }

    /// Stops timing.
    pub fn disarm(&mut self) {
        self.last = None;
        self.lost = false;
    }

    /// Records a liveness packet. Returns true if the heartbeat had been lost.
    pub fn on_heartbeat(&mut self, now: Instant) -> bool {
        self.last = Some(now);
        std::mem::replace(&mut self.lost, false)
    }

    /// Returns true if the timeout elapsed since the last liveness packet and
    /// this has not been reported yet.
    pub fn check(&mut self, now: Instant) -> bool {
        let Some(last) = self.last else {
            return false;
        };
        if self.lost || now.saturating_duration_since(last) < self.timeout {
            return false;
        }
        self.lost = true;
        true
    }

    /// Returns true while the heartbeat is lost.
    #[must_use]
    pub const fn is_lost(&self) -> bool {
        self.lost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(100);

    #[test]
    fn test_unarmed_never_fires() {
        let mut monitor = HeartbeatMonitor::new(TIMEOUT);
        assert!(!monitor.check(Instant::now() + TIMEOUT * 10));
    }

    #[test]
    fn test_lost_once_then_regained_once() {
        let start = Instant::now();
        let mut monitor = HeartbeatMonitor::new(TIMEOUT);
        monitor.reset(start);

        assert!(!monitor.check(start + TIMEOUT / 2));
        assert!(monitor.check(start + TIMEOUT));
        assert!(!monitor.check(start + TIMEOUT * 3));
        assert!(monitor.is_lost());

        let back = start + TIMEOUT * 4;
        assert!(monitor.on_heartbeat(back));
        assert!(!monitor.on_heartbeat(back));
        assert!(!monitor.check(back + TIMEOUT / 2));
        assert!(monitor.check(back + TIMEOUT));
    }

    #[test]
    fn test_heartbeats_keep_alive() {
        let start = Instant::now();
        let mut monitor = HeartbeatMonitor::new(TIMEOUT);
        monitor.reset(start);
        for step in 1..10u32 {
            let now = start + TIMEOUT / 2 * step;
            assert!(!monitor.on_heartbeat(now));
            assert!(!monitor.check(now));
        }
    }

    #[test]
    fn test_disarm() {
        let start = Instant::now();
        let mut monitor = HeartbeatMonitor::new(TIMEOUT);
        monitor.reset(start);
        monitor.disarm();
        assert!(!monitor.check(start + TIMEOUT * 2));
    }
}
