//! Per-entity death sequences.
//!
//! ```text
//! Idle --begin--> Pinned --hit_held--> HitHeld --flourishing--> Flourishing --remove--> Removed
//! ```
//!
//! A sequence is active from `begin` until `remove`. While it is active a
//! second `begin` for the same id is absorbed. `Removed` is terminal for that
//! sequence only; a later death of a reused id starts a fresh one.
//!
//! Removal drops the sequence and keeps only the token high-water mark of
//! that moment. Commits at or below the mark belong to the dead entity and
//! are refused; the first newer one clears the mark.
//!
//! The orchestrator only tracks phases. The session owns the clock and
//! drives each transition from a queued task.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::EntityId;
use crate::effects::EffectToken;
use crate::timeline::Millis;

/// Phase of a death sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathPhase {
    /// No sequence has started.
    #[default]
    Idle,
    /// Held on screen, waiting for the death instant.
    Pinned,
    /// Reacting to the killing hit.
    HitHeld,
    /// Death flourish playing.
    Flourishing,
    /// Gone from the board; no newer effect has arrived yet.
    Removed,
}

impl DeathPhase {
    /// Check if this phase belongs to a running sequence.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, DeathPhase::Pinned | DeathPhase::HitHeld | DeathPhase::Flourishing)
    }
}

/// One entity's death sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeathSequence {
    pub entity: EntityId,
    pub phase: DeathPhase,
    /// Absolute time of the death instant.
    pub death_at: Millis,
    /// Token of the flourish, once minted.
    pub flourish_token: Option<EffectToken>,
}

/// Tracks every death sequence of a session.
#[derive(Clone, Debug, Default)]
pub struct DeathOrchestrator {
    sequences: FxHashMap<EntityId, DeathSequence>,
    /// High-water marks of removed ids.
    removed: FxHashMap<EntityId, EffectToken>,
    active: usize,
}

impl DeathOrchestrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a sequence for `entity` dying at `death_at`.
    ///
    /// Returns false if a sequence for the id is already active.
    pub fn begin(&mut self, entity: &EntityId, death_at: Millis) -> bool {
        if self.is_active(entity) {
            tracing::debug!(target: "choreo::death", %entity, "duplicate death absorbed");
            return false;
        }
        self.removed.remove(entity);
        self.sequences.insert(
            entity.clone(),
            DeathSequence {
                entity: entity.clone(),
                phase: DeathPhase::Pinned,
                death_at,
                flourish_token: None,
            },
        );
        self.active += 1;
        true
    }

    /// `Pinned -> HitHeld`.
    pub fn hit_held(&mut self, entity: &EntityId) -> bool {
        self.advance(entity, DeathPhase::Pinned, DeathPhase::HitHeld)
    }

    /// `HitHeld -> Flourishing`, remembering the flourish token.
    pub fn flourishing(&mut self, entity: &EntityId, token: EffectToken) -> bool {
        if !self.advance(entity, DeathPhase::HitHeld, DeathPhase::Flourishing) {
            return false;
        }
        if let Some(seq) = self.sequences.get_mut(entity) {
            seq.flourish_token = Some(token);
        }
        true
    }

    /// `Flourishing -> Removed`, only for the sequence that minted `token`.
    ///
    /// `high_water` is the newest token minted so far.
    pub fn remove(&mut self, entity: &EntityId, token: EffectToken, high_water: EffectToken) -> bool {
        let owns = self
            .sequences
            .get(entity)
            .is_some_and(|seq| seq.flourish_token == Some(token));
        if !owns || !self.advance(entity, DeathPhase::Flourishing, DeathPhase::Removed) {
            return false;
        }
        self.sequences.remove(entity);
        self.removed.insert(entity.clone(), high_water.max(token));
        true
    }

    /// Check if a commit carrying `token` may land on `entity`.
    ///
    /// Refuses tokens minted before the entity was removed. A newer token
    /// clears the mark.
    pub fn admits(&mut self, entity: &EntityId, token: EffectToken) -> bool {
        match self.removed.get(entity).copied() {
            Some(mark) if token <= mark => false,
            Some(_) => {
                self.removed.remove(entity);
                true
            }
            None => true,
        }
    }

    fn advance(&mut self, entity: &EntityId, from: DeathPhase, to: DeathPhase) -> bool {
        let Some(seq) = self.sequences.get_mut(entity) else {
            return false;
        };
        if seq.phase != from {
            return false;
        }
        seq.phase = to;
        if !to.is_active() {
            self.active -= 1;
        }
        true
    }

    /// Current phase; `Idle` if the id never died.
    #[must_use]
    pub fn phase(&self, entity: &EntityId) -> DeathPhase {
        match self.sequences.get(entity) {
            Some(seq) => seq.phase,
            None if self.removed.contains_key(entity) => DeathPhase::Removed,
            None => DeathPhase::Idle,
        }
    }

    /// The unfinished sequence for `entity`, if any.
    #[must_use]
    pub fn sequence(&self, entity: &EntityId) -> Option<&DeathSequence> {
        self.sequences.get(entity)
    }

    #[must_use]
    pub fn is_active(&self, entity: &EntityId) -> bool {
        self.phase(entity).is_active()
    }

    /// Number of running sequences.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Running sequences.
    pub fn active(&self) -> impl Iterator<Item = &DeathSequence> {
        self.sequences.values()
    }

    /// Ids still holding a removal mark.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Forget every sequence.
    pub fn clear(&mut self) {
        self.sequences.clear();
        self.removed.clear();
        self.active = 0;
    }
}
