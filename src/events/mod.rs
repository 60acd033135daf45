//! Game events and incremental log consumption.
//!
//! - [`GameEvent`]: one immutable record from the rules engine
//! - [`EventDeltaTracker`]: hands out the not-yet-scheduled suffix of the log
//!
//! ```
//! use ccg_choreo::events::{EventDeltaTracker, GameEvent};
//!
//! let mut log = vec![GameEvent::attack("wolf", "bear"), GameEvent::damage("bear", 3)];
//! let mut tracker = EventDeltaTracker::new();
//!
//! assert_eq!(tracker.delta(&log).events.len(), 2);
//!
//! log.push(GameEvent::death("bear"));
//! let delta = tracker.delta(&log);
//! assert_eq!(delta.events, &[GameEvent::death("bear")]);
//! ```

mod event;
mod tracker;

pub use event::{GameEvent, GameEventType};
pub use tracker::{Delta, EventDeltaTracker};
