//! Session counters for diagnostics.

use serde::{Deserialize, Serialize};

/// Counters collected while a session runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Events taken from the log.
    pub events_ingested: u64,

    /// Effect instances scheduled, synthetic hits included.
    pub effects_scheduled: u64,

    /// Hit flashes added for deaths with no visible hit.
    pub synthetic_hits: u64,

    /// Death sequences started.
    pub deaths_started: u64,

    /// Death events absorbed because a sequence was already running.
    pub duplicate_deaths: u64,

    /// Death sequences that reached removal.
    pub deaths_completed: u64,

    /// Log resets seen.
    pub resets: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fraction of started deaths that needed a synthetic hit.
    #[must_use]
    pub fn synthetic_hit_ratio(&self) -> f64 {
        if self.deaths_started == 0 {
            0.0
        } else {
            self.synthetic_hits as f64 / self.deaths_started as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SessionStats::new();
        assert_eq!(stats.events_ingested, 0);
        assert_eq!(stats.synthetic_hit_ratio(), 0.0);
    }

    #[test]
    fn test_synthetic_hit_ratio() {
        let mut stats = SessionStats::new();
        stats.deaths_started = 4;
        stats.synthetic_hits = 1;
        assert!((stats.synthetic_hit_ratio() - 0.25).abs() < 1e-9);

        stats.reset();
        assert_eq!(stats, SessionStats::default());
    }
}
