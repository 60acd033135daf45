//! Log of visible damage hits, for the synthetic-hit check.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::EntityId;
use crate::timeline::Millis;

/// Absolute times at which a visible damage hit lands on each entity.
#[derive(Clone, Debug, Default)]
pub struct HitLog {
    hits: FxHashMap<EntityId, SmallVec<[Millis; 4]>>,
}

impl HitLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hit on `entity` at `at`.
    pub fn record(&mut self, entity: &EntityId, at: Millis) {
        self.hits.entry(entity.clone()).or_default().push(at);
    }

    /// Check for a hit on `entity` within `window` of `at`, either side.
    #[must_use]
    pub fn has_hit_near(&self, entity: &EntityId, at: Millis, window: Millis) -> bool {
        self.hits
            .get(entity)
            .is_some_and(|times| times.iter().any(|&t| t.abs_diff(at) <= window))
    }

    /// Forget hits strictly before `before`.
    pub fn prune(&mut self, before: Millis) {
        self.hits.retain(|_, times| {
            times.retain(|t| *t >= before);
            !times.is_empty()
        });
    }

    pub fn clear(&mut self) {
        self.hits.clear();
    }

    /// Number of remembered hits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.values().map(SmallVec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
