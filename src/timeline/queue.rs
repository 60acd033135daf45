//! Deferred task queue.
//!
//! All deferred work of a session is plain data held here, keyed by an
//! opaque [`TimerHandle`]. Nothing runs by itself: the owner pops due tasks
//! while advancing its clock, and can cancel any task (or all of them)
//! without it ever firing.
//!
//! Tasks due at the same instant come out in the order they were scheduled.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::Millis;
use crate::core::EntityId;
use crate::effects::{EffectKind, EffectPayload, EffectToken};

/// Handle for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// A unit of deferred work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Task {
    /// Write an effect slot.
    Commit {
        target: EntityId,
        kind: EffectKind,
        payload: EffectPayload,
        token: EffectToken,
    },
    /// Clear an effect slot if it still holds `token`.
    Clear {
        target: EntityId,
        kind: EffectKind,
        token: EffectToken,
    },
    /// A pinned entity reaches its scheduled death instant.
    DeathHit { entity: EntityId },
    /// The hit hold is over; start the flourish.
    DeathFlourish { entity: EntityId },
    /// The flourish is over; unpin.
    DeathRemove { entity: EntityId, token: EffectToken },
}

/// Owned set of outstanding deferred tasks.
#[derive(Clone, Debug, Default)]
pub struct TaskQueue {
    /// Ordered by (due time, handle); handles increase, so ties keep
    /// scheduling order.
    pending: BTreeMap<(Millis, TimerHandle), Task>,
    due_at: FxHashMap<TimerHandle, Millis>,
    next_handle: u64,
}

impl TaskQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to come due at `at`.
    pub fn schedule(&mut self, at: Millis, task: Task) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.insert((at, handle), task);
        self.due_at.insert(handle, at);
        handle
    }

    /// Cancel one task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.due_at.remove(&handle) {
            Some(at) => self.pending.remove(&(at, handle)).is_some(),
            None => false,
        }
    }

    /// Cancel every outstanding task. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        self.due_at.clear();
        count
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, TimerHandle, Task)> {
        let (&(at, handle), _) = self.pending.first_key_value()?;
        if at > now {
            return None;
        }
        let task = self.pending.remove(&(at, handle))?;
        self.due_at.remove(&handle);
        Some((at, handle, task))
    }

    /// When the earliest outstanding task comes due.
    #[must_use]
    pub fn next_due(&self) -> Option<Millis> {
        self.pending.keys().next().map(|&(at, _)| at)
    }

    /// Check if a task is still outstanding.
    #[must_use]
    pub fn contains(&self, handle: TimerHandle) -> bool {
        self.due_at.contains_key(&handle)
    }

    /// Number of outstanding tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterate over outstanding tasks in due order.
    pub fn iter(&self) -> impl Iterator<Item = (Millis, TimerHandle, &Task)> {
        self.pending.iter().map(|(&(at, handle), task)| (at, handle, task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(entity: &str) -> Task {
        Task::DeathHit { entity: EntityId::new(entity) }
    }

    #[test]
    fn test_pop_in_due_order() {
        let mut queue = TaskQueue::new();
        queue.schedule(300, hit("c"));
        queue.schedule(100, hit("a"));
        queue.schedule(200, hit("b"));

        assert_eq!(queue.next_due(), Some(100));
        assert_eq!(queue.pop_due(1000).unwrap().2, hit("a"));
        assert_eq!(queue.pop_due(1000).unwrap().2, hit("b"));
        assert_eq!(queue.pop_due(1000).unwrap().2, hit("c"));
        assert!(queue.pop_due(1000).is_none());
    }

    #[test]
    fn test_nothing_due_yet() {
        let mut queue = TaskQueue::new();
        queue.schedule(500, hit("a"));

        assert!(queue.pop_due(499).is_none());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(500).unwrap().0, 500);
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let mut queue = TaskQueue::new();
        queue.schedule(100, hit("first"));
        queue.schedule(100, hit("second"));
        queue.schedule(100, hit("third"));

        let order: Vec<_> = std::iter::from_fn(|| queue.pop_due(100).map(|(_, _, t)| t)).collect();
        assert_eq!(order, vec![hit("first"), hit("second"), hit("third")]);
    }

    #[test]
    fn test_cancel() {
        let mut queue = TaskQueue::new();
        let a = queue.schedule(100, hit("a"));
        let b = queue.schedule(200, hit("b"));

        assert!(queue.cancel(a));
        assert!(!queue.cancel(a));
        assert!(!queue.contains(a));
        assert!(queue.contains(b));

        let (_, handle, _) = queue.pop_due(1000).unwrap();
        assert_eq!(handle, b);
        assert!(!queue.cancel(b));
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = TaskQueue::new();
        for i in 0..5 {
            queue.schedule(i * 10, hit("x"));
        }

        assert_eq!(queue.cancel_all(), 5);
        assert!(queue.is_empty());
        assert!(queue.pop_due(Millis::MAX).is_none());
    }

    #[test]
    fn test_handles_are_unique() {
        let mut queue = TaskQueue::new();
        let a = queue.schedule(0, hit("a"));
        let b = queue.schedule(0, hit("a"));
        assert_ne!(a, b);
        assert_eq!(queue.iter().count(), 2);
    }
}
