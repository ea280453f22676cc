//! Trailing-edge debouncer for terminal resize events.

use std::time::{Duration, Instant};

/// Quiet period after the last resize before cell sizes are recomputed.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Collapses a burst of events into one trigger after a quiet period.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records an event at `now`, replacing any pending one.
    pub fn push_at(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Records an event now.
    pub fn push(&mut self, value: T) {
        self.push_at(value, Instant::now());
    }

    /// Whether an event is waiting for its quiet period to end.
    #[inline]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the latest value once `delay` has passed since it was pushed.
    pub fn poll_at(&mut self, now: Instant) -> Option<T> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.delay);
        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Polls against the current time.
    pub fn poll(&mut self) -> Option<T> {
        self.poll_at(Instant::now())
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_pending() {
        let mut debouncer: Debouncer<u16> = Debouncer::default();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(), None);
    }

    #[test]
    fn test_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(200));

        debouncer.push_at(80u16, start);
        debouncer.push_at(90, start + Duration::from_millis(50));
        debouncer.push_at(120, start + Duration::from_millis(100));

        assert_eq!(debouncer.poll_at(start + Duration::from_millis(250)), None);
        assert_eq!(
            debouncer.poll_at(start + Duration::from_millis(300)),
            Some(120)
        );
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll_at(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn test_new_event_restarts_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(200));

        debouncer.push_at(1u8, start);
        debouncer.push_at(2, start + Duration::from_millis(190));
        assert_eq!(debouncer.poll_at(start + Duration::from_millis(210)), None);
        assert_eq!(debouncer.poll_at(start + Duration::from_millis(390)), Some(2));
    }
}
