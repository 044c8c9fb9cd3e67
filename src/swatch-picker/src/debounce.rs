//! Trailing-edge debounce for work driven by bursty events.
//!
//! A [`Debouncer`] holds at most one pending deadline. Every [`schedule`]
//! replaces it, so a burst of events collapses into one firing `wait` after
//! the last event. The owner drives it by calling [`poll`] with the current
//! time; there is no timer thread.
//!
//! [`schedule`]: Debouncer::schedule
//! [`poll`]: Debouncer::poll

use std::time::{Duration, Instant};

/// Single-slot deferred task holder.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Creates a debouncer that fires `wait` after the last scheduled event.
    #[must_use]
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// The quiet period.
    #[must_use]
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Records an event at `now`, replacing any pending deadline.
    ///
    /// Returns true if a pending firing was superseded.
    pub fn schedule(&mut self, now: Instant) -> bool {
        self.deadline.replace(now + self.wait).is_some()
    }

    /// Drops the pending firing, if any. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Returns true exactly once when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// When the pending firing is due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a firing is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(100);

    #[test]
    fn test_burst_fires_once_after_last_event() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WAIT);
        let mut fired = Vec::new();

        // Ten events 20ms apart, then polling every 10ms for a second.
        let last_event = start + Duration::from_millis(180);
        for tick in 0..=100_u64 {
            let now = start + Duration::from_millis(tick * 10);
            if tick % 2 == 0 && now <= last_event {
                debouncer.schedule(now);
            }
            if debouncer.poll(now) {
                fired.push(now);
            }
        }

        assert_eq!(fired, vec![last_event + WAIT]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_schedule_replaces_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WAIT);

        assert!(!debouncer.schedule(start));
        assert!(debouncer.schedule(start + Duration::from_millis(50)));
        assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(150)));

        assert!(!debouncer.poll(start + Duration::from_millis(149)));
        assert!(debouncer.poll(start + Duration::from_millis(150)));
        assert!(!debouncer.poll(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WAIT);
        assert!(!debouncer.cancel());

        debouncer.schedule(start);
        assert!(debouncer.cancel());
        assert!(!debouncer.poll(start + WAIT));
    }

    #[test]
    fn test_zero_wait_fires_on_next_poll() {
        let now = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.schedule(now);
        debouncer.schedule(now);
        assert!(debouncer.poll(now));
        assert!(!debouncer.poll(now));
    }
}
