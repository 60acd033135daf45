//! Per-target effect state.
//!
//! The store maps each target id to one slot per [`EffectKind`]. Writers
//! never edit a slot in place: a commit replaces the whole slot, a clear
//! removes it, and both compare tokens first. That makes deferred updates
//! safe to apply in any order:
//!
//! - a commit whose token is older than the slot's current token is dropped
//! - a clear only removes the slot if the slot still holds its token
//!
//! ```
//! use ccg_choreo::core::EntityId;
//! use ccg_choreo::effects::{EffectKind, EffectPayload, EffectStore, HitKind, TokenMint};
//!
//! let mut store = EffectStore::new();
//! let mut mint = TokenMint::new();
//! let bear = EntityId::new("bear");
//!
//! let a = mint.mint();
//! let b = mint.mint();
//! store.commit(&bear, EffectKind::HitFlash, EffectPayload::Hit(HitKind::Damage), a);
//! store.commit(&bear, EffectKind::HitFlash, EffectPayload::Hit(HitKind::Heal), b);
//!
//! // The first flash's cleanup arrives late and must not erase the second.
//! assert!(!store.clear_if(&bear, EffectKind::HitFlash, a));
//! assert_eq!(store.hit_flash(&bear), Some(HitKind::Heal));
//! ```

use rustc_hash::FxHashMap;

use super::effect::{EffectKind, EffectPayload, EffectSlot, FloatingNumber, HitKind};
use super::token::EffectToken;
use crate::cards::Polarity;
use crate::core::EntityId;

/// All effect slots of one target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectRecord {
    slots: [Option<EffectSlot>; EffectKind::COUNT],
}

impl EffectRecord {
    /// Get the slot for a kind.
    #[must_use]
    pub fn get(&self, kind: EffectKind) -> Option<&EffectSlot> {
        self.slots[kind.index()].as_ref()
    }

    /// Check if no slot is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterate over set slots.
    pub fn iter(&self) -> impl Iterator<Item = (EffectKind, &EffectSlot)> {
        EffectKind::ALL
            .iter()
            .filter_map(|&kind| self.get(kind).map(|slot| (kind, slot)))
    }
}

/// Token-guarded effect state for every target.
#[derive(Clone, Debug, Default)]
pub struct EffectStore {
    records: FxHashMap<EntityId, EffectRecord>,
}

impl EffectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `payload` into the target's slot for `kind`.
    ///
    /// Returns false (and writes nothing) if the slot already holds a newer
    /// token.
    pub fn commit(
        &mut self,
        target: &EntityId,
        kind: EffectKind,
        payload: EffectPayload,
        token: EffectToken,
    ) -> bool {
        let record = self.records.entry(target.clone()).or_default();
        let slot = &mut record.slots[kind.index()];

        if let Some(current) = slot.as_ref().filter(|current| current.token > token) {
            tracing::trace!(
                target: "choreo::effects",
                %target, ?kind, %token, current = %current.token,
                "commit superseded by newer effect"
            );
            return false;
        }

        *slot = Some(EffectSlot { token, payload });
        true
    }

    /// Clear the target's slot for `kind` if it still holds `token`.
    ///
    /// Returns false when the slot was already cleared or taken over by a
    /// newer effect. That is routine, not an error.
    pub fn clear_if(&mut self, target: &EntityId, kind: EffectKind, token: EffectToken) -> bool {
        let Some(record) = self.records.get_mut(target) else {
            return false;
        };

        let slot = &mut record.slots[kind.index()];
        if !slot.as_ref().is_some_and(|current| current.token == token) {
            tracing::trace!(
                target: "choreo::effects",
                %target, ?kind, %token,
                "stale cleanup skipped"
            );
            return false;
        }
        *slot = None;

        if record.is_empty() {
            self.records.remove(target);
        }
        true
    }

    /// Drop every slot of a target. Returns true if anything was set.
    pub fn purge(&mut self, target: &EntityId) -> bool {
        self.records.remove(target).is_some()
    }

    /// Drop all effect state.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Get a target's slot for a kind.
    #[must_use]
    pub fn get(&self, target: &EntityId, kind: EffectKind) -> Option<&EffectSlot> {
        self.records.get(target).and_then(|record| record.get(kind))
    }

    /// Get a target's whole record.
    #[must_use]
    pub fn record(&self, target: &EntityId) -> Option<&EffectRecord> {
        self.records.get(target)
    }

    /// Check if the target has any live effect.
    #[must_use]
    pub fn has_any(&self, target: &EntityId) -> bool {
        self.records.contains_key(target)
    }

    /// Number of targets with at least one live effect.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over every live slot.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, EffectKind, &EffectSlot)> {
        self.records
            .iter()
            .flat_map(|(id, record)| record.iter().map(move |(kind, slot)| (id, kind, slot)))
    }

    // === Render accessors ===

    #[must_use]
    pub fn attack_source_token(&self, target: &EntityId) -> Option<EffectToken> {
        self.get(target, EffectKind::AttackSource).map(|slot| slot.token)
    }

    #[must_use]
    pub fn attack_target_token(&self, target: &EntityId) -> Option<EffectToken> {
        self.get(target, EffectKind::AttackTarget).map(|slot| slot.token)
    }

    #[must_use]
    pub fn hit_flash(&self, target: &EntityId) -> Option<HitKind> {
        match self.get(target, EffectKind::HitFlash)?.payload {
            EffectPayload::Hit(kind) => Some(kind),
            _ => None,
        }
    }

    #[must_use]
    pub fn floating_number(&self, target: &EntityId) -> Option<FloatingNumber> {
        match self.get(target, EffectKind::FloatingNumber)?.payload {
            EffectPayload::Float(number) => Some(number),
            _ => None,
        }
    }

    #[must_use]
    pub fn spell_impact(&self, target: &EntityId) -> Option<Polarity> {
        match self.get(target, EffectKind::SpellImpact)?.payload {
            EffectPayload::Impact(polarity) => Some(polarity),
            _ => None,
        }
    }

    /// Token of the running death flourish, if any.
    #[must_use]
    pub fn death_flourish(&self, target: &EntityId) -> Option<EffectToken> {
        self.get(target, EffectKind::DeathFlourish).map(|slot| slot.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::TokenMint;

    fn id(s: &str) -> EntityId {
        EntityId::new(s)
    }

    #[test]
    fn test_commit_and_clear() {
        let mut store = EffectStore::new();
        let mut mint = TokenMint::new();
        let t = mint.mint();

        assert!(store.commit(&id("a"), EffectKind::HitFlash, EffectPayload::Hit(HitKind::Damage), t));
        assert_eq!(store.hit_flash(&id("a")), Some(HitKind::Damage));

        assert!(store.clear_if(&id("a"), EffectKind::HitFlash, t));
        assert_eq!(store.hit_flash(&id("a")), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_slots_are_independent() {
        let mut store = EffectStore::new();
        let mut mint = TokenMint::new();
        let a = mint.mint();
        let b = mint.mint();

        store.commit(&id("t"), EffectKind::HitFlash, EffectPayload::Hit(HitKind::Damage), a);
        store.commit(&id("t"), EffectKind::SpellImpact, EffectPayload::Impact(Polarity::Harm), b);

        assert_eq!(store.hit_flash(&id("t")), Some(HitKind::Damage));
        assert_eq!(store.spell_impact(&id("t")), Some(Polarity::Harm));

        store.clear_if(&id("t"), EffectKind::HitFlash, a);
        assert_eq!(store.hit_flash(&id("t")), None);
        assert_eq!(store.spell_impact(&id("t")), Some(Polarity::Harm));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_stale_clear_is_skipped() {
        let mut store = EffectStore::new();
        let mut mint = TokenMint::new();
        let a = mint.mint();
        let b = mint.mint();

        store.commit(&id("t"), EffectKind::HitFlash, EffectPayload::Hit(HitKind::Damage), a);
        store.commit(&id("t"), EffectKind::HitFlash, EffectPayload::Hit(HitKind::Damage), b);

        assert!(!store.clear_if(&id("t"), EffectKind::HitFlash, a));
        assert_eq!(store.get(&id("t"), EffectKind::HitFlash).unwrap().token, b);
    }

    #[test]
    fn test_late_older_commit_is_dropped() {
        let mut store = EffectStore::new();
        let mut mint = TokenMint::new();
        let old = mint.mint();
        let new = mint.mint();

        store.commit(&id("t"), EffectKind::SpellImpact, EffectPayload::Impact(Polarity::Benefit), new);
        assert!(!store.commit(&id("t"), EffectKind::SpellImpact, EffectPayload::Impact(Polarity::Harm), old));
        assert_eq!(store.spell_impact(&id("t")), Some(Polarity::Benefit));
    }

    #[test]
    fn test_clear_unknown_target() {
        let mut store = EffectStore::new();
        assert!(!store.clear_if(&id("ghost"), EffectKind::DeathFlourish, EffectToken(1)));
    }

    #[test]
    fn test_purge() {
        let mut store = EffectStore::new();
        let mut mint = TokenMint::new();
        store.commit(&id("t"), EffectKind::AttackSource, EffectPayload::Marker, mint.mint());
        store.commit(&id("t"), EffectKind::DeathFlourish, EffectPayload::Marker, mint.mint());

        assert!(store.purge(&id("t")));
        assert!(!store.has_any(&id("t")));
        assert!(!store.purge(&id("t")));
    }

    #[test]
    fn test_accessors() {
        let mut store = EffectStore::new();
        let mut mint = TokenMint::new();
        let src = mint.mint();
        let tgt = mint.mint();
        let flourish = mint.mint();

        store.commit(&id("a"), EffectKind::AttackSource, EffectPayload::Marker, src);
        store.commit(&id("b"), EffectKind::AttackTarget, EffectPayload::Marker, tgt);
        store.commit(
            &id("b"),
            EffectKind::FloatingNumber,
            EffectPayload::Float(FloatingNumber { kind: HitKind::Damage, magnitude: 4 }),
            mint.mint(),
        );
        store.commit(&id("c"), EffectKind::DeathFlourish, EffectPayload::Marker, flourish);

        assert_eq!(store.attack_source_token(&id("a")), Some(src));
        assert_eq!(store.attack_target_token(&id("b")), Some(tgt));
        assert_eq!(store.attack_target_token(&id("a")), None);
        assert_eq!(
            store.floating_number(&id("b")),
            Some(FloatingNumber { kind: HitKind::Damage, magnitude: 4 })
        );
        assert_eq!(store.death_flourish(&id("c")), Some(flourish));
        assert_eq!(store.iter().count(), 4);
    }
}
