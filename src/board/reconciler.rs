//! Battlefield reconciliation.
//!
//! The authoritative snapshot drops a creature the moment it dies, but the
//! client keeps drawing it until its death animation is over. The reconciler
//! keeps those two notions apart:
//!
//! - the snapshot says what is alive
//! - the pinned set says what is still dying on screen
//!
//! The render list is all live creatures plus every pinned creature the
//! snapshot no longer lists. Pinned creatures keep the attributes they had
//! when their death was first seen.
//!
//! ## Invariants
//!
//! - every authoritative creature appears exactly once, `is_dying = false`
//! - every pinned creature absent from the snapshot appears exactly once,
//!   `is_dying = true`
//! - lists are ordered by board position
//! - re-rendering against an unchanged snapshot changes nothing

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::creature::BoardCreature;
use super::snapshot::Side;
use crate::core::EntityId;

/// A creature as the view should draw it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEntity {
    pub creature: BoardCreature,
    pub is_dying: bool,
}

impl RenderedEntity {
    #[must_use]
    pub fn live(creature: BoardCreature) -> Self {
        Self { creature, is_dying: false }
    }

    #[must_use]
    pub fn dying(creature: BoardCreature) -> Self {
        Self { creature, is_dying: true }
    }

    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.creature.instance_id
    }
}

/// Merge the previous render list with a fresh authoritative list.
///
/// Authoritative creatures are taken verbatim as live. Dying entries of
/// `rendered_prev` the snapshot no longer lists are carried forward
/// unchanged. Everything else in `rendered_prev` is dropped.
#[must_use]
pub fn merge(rendered_prev: &Vector<RenderedEntity>, authoritative: &[BoardCreature]) -> Vector<RenderedEntity> {
    let live: FxHashSet<&EntityId> = authoritative.iter().map(|c| &c.instance_id).collect();

    let mut merged: Vec<RenderedEntity> = authoritative
        .iter()
        .cloned()
        .map(RenderedEntity::live)
        .collect();

    let mut carried: FxHashSet<&EntityId> = FxHashSet::default();
    for entry in rendered_prev.iter() {
        if entry.is_dying && !live.contains(entry.id()) && carried.insert(entry.id()) {
            merged.push(entry.clone());
        }
    }

    // Stable: on a shared position, live creatures come first.
    merged.sort_by_key(|entry| entry.creature.position);
    merged.into_iter().collect()
}

/// A creature kept on screen while its death sequence runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedEntity {
    pub side: Side,
    /// Last-known attributes, attack eligibility forced off.
    pub creature: BoardCreature,
}

/// Owns the pinned set and the current render list of each side.
#[derive(Clone, Debug, Default)]
pub struct BattlefieldReconciler {
    pinned: FxHashMap<EntityId, PinnedEntity>,
    player: Vector<RenderedEntity>,
    opponent: Vector<RenderedEntity>,
}

impl BattlefieldReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a creature. Its attributes are frozen as given.
    ///
    /// Returns false if the id is already pinned; the first capture wins.
    pub fn pin(&mut self, side: Side, creature: &BoardCreature) -> bool {
        let id = creature.instance_id.clone();
        if self.pinned.contains_key(&id) {
            return false;
        }
        self.pinned.insert(
            id,
            PinnedEntity {
                side,
                creature: creature.frozen_for_death(),
            },
        );
        true
    }

    /// Release a pin. The creature leaves the render list on the next render.
    pub fn unpin(&mut self, id: &EntityId) -> bool {
        self.pinned.remove(id).is_some()
    }

    #[must_use]
    pub fn is_pinned(&self, id: &EntityId) -> bool {
        self.pinned.contains_key(id)
    }

    #[must_use]
    pub fn pinned(&self, id: &EntityId) -> Option<&PinnedEntity> {
        self.pinned.get(id)
    }

    #[must_use]
    pub fn pinned_count(&self) -> usize {
        self.pinned.len()
    }

    /// Drop every pin and both render lists.
    pub fn clear(&mut self) {
        self.pinned.clear();
        self.player = Vector::new();
        self.opponent = Vector::new();
    }

    /// Current render list of a side.
    #[must_use]
    pub fn rendered(&self, side: Side) -> &Vector<RenderedEntity> {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Find an id in the current render lists.
    #[must_use]
    pub fn find(&self, id: &EntityId) -> Option<(Side, &RenderedEntity)> {
        Side::BOTH.iter().find_map(|&side| {
            self.rendered(side)
                .iter()
                .find(|entry| entry.id() == id)
                .map(|entry| (side, entry))
        })
    }

    /// Recompute a side's render list against its authoritative creatures.
    pub fn render(&mut self, side: Side, authoritative: &[BoardCreature]) -> &Vector<RenderedEntity> {
        let mut prev: Vector<RenderedEntity> = self
            .rendered(side)
            .iter()
            .filter(|entry| entry.is_dying && self.pinned.contains_key(entry.id()))
            .cloned()
            .collect();

        let mut fresh: Vec<&PinnedEntity> = self
            .pinned
            .values()
            .filter(|pin| pin.side == side && !prev.iter().any(|e| e.id() == &pin.creature.instance_id))
            .collect();
        fresh.sort_by(|a, b| a.creature.instance_id.cmp(&b.creature.instance_id));
        for pin in fresh {
            prev.push_back(RenderedEntity::dying(pin.creature.clone()));
        }

        let merged = merge(&prev, authoritative);
        let slot = match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        };
        *slot = merged;
        slot
    }
}
