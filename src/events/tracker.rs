//! Incremental consumption of the event log.
//!
//! The client keeps the whole event log of a match and appends each action
//! response's events to it. [`EventDeltaTracker`] remembers how much of that
//! log has already been scheduled and hands back only the new suffix.
//!
//! A log shorter than the cursor means the log was replaced (a new match or
//! an explicit reset). The tracker then starts over from zero and flags the
//! delta as a reset.

use super::event::GameEvent;

/// The unprocessed suffix of the event log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delta<'a> {
    /// New events, in log order.
    pub events: &'a [GameEvent],
    /// True if the log shrank and processing restarted from zero.
    pub reset: bool,
}

impl Delta<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Processing cursor over a growing event log.
#[derive(Clone, Debug, Default)]
pub struct EventDeltaTracker {
    cursor: usize,
}

impl EventDeltaTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of leading events already handed out.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Return `log[cursor..]` and advance the cursor to `log.len()`.
    pub fn delta<'a>(&mut self, log: &'a [GameEvent]) -> Delta<'a> {
        let reset = log.len() < self.cursor;
        if reset {
            tracing::debug!(
                target: "choreo::tracker",
                previous = self.cursor,
                len = log.len(),
                "event log shrank, restarting from zero"
            );
            self.cursor = 0;
        }

        let events = &log[self.cursor..];
        self.cursor = log.len();
        Delta { events, reset }
    }

    /// Rewind to the start of the log.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(n: usize) -> Vec<GameEvent> {
        (0..n).map(|i| GameEvent::damage(format!("c{i}"), i as i64)).collect()
    }

    #[test]
    fn test_first_delta_is_whole_log() {
        let mut tracker = EventDeltaTracker::new();
        let events = log(3);

        let delta = tracker.delta(&events);
        assert_eq!(delta.events.len(), 3);
        assert!(!delta.reset);
        assert_eq!(tracker.cursor(), 3);
    }

    #[test]
    fn test_growing_log_yields_suffix() {
        let mut tracker = EventDeltaTracker::new();
        let events = log(5);

        assert_eq!(tracker.delta(&events[..2]).events, &events[..2]);
        assert_eq!(tracker.delta(&events[..4]).events, &events[2..4]);
        assert_eq!(tracker.delta(&events).events, &events[4..]);
        assert_eq!(tracker.cursor(), 5);
    }

    #[test]
    fn test_unchanged_log_yields_nothing() {
        let mut tracker = EventDeltaTracker::new();
        let events = log(2);
        tracker.delta(&events);

        let delta = tracker.delta(&events);
        assert!(delta.is_empty());
        assert!(!delta.reset);
        assert_eq!(tracker.cursor(), 2);
    }

    #[test]
    fn test_shorter_log_resets() {
        let mut tracker = EventDeltaTracker::new();
        tracker.delta(&log(5));
        assert_eq!(tracker.cursor(), 5);

        let fresh = log(2);
        let delta = tracker.delta(&fresh);
        assert!(delta.reset);
        assert_eq!(delta.events.len(), 2);
        assert_eq!(tracker.cursor(), 2);
    }

    #[test]
    fn test_empty_log_after_progress_resets() {
        let mut tracker = EventDeltaTracker::new();
        tracker.delta(&log(3));

        let delta = tracker.delta(&[]);
        assert!(delta.reset);
        assert!(delta.is_empty());
        assert_eq!(tracker.cursor(), 0);
    }

    #[test]
    fn test_explicit_reset() {
        let mut tracker = EventDeltaTracker::new();
        let events = log(3);
        tracker.delta(&events);
        tracker.reset();

        assert_eq!(tracker.delta(&events).events.len(), 3);
    }
}
