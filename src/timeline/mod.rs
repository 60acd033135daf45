//! Virtual time: stagger planning and the deferred task queue.

mod planner;
mod queue;

/// Milliseconds of session time.
pub type Millis = u64;

pub use planner::{Plan, PlannedAction, PlannedEffect, SpellWindow, TimelinePlanner};
pub use queue::{Task, TaskQueue, TimerHandle};
