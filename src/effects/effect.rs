//! Effect kinds and payloads.
//!
//! Every target has one independent slot per [`EffectKind`]. A slot holds
//! an [`EffectPayload`] stamped with the [`EffectToken`] of the effect
//! instance that wrote it.

use serde::{Deserialize, Serialize};

use super::token::EffectToken;
use crate::cards::Polarity;
use crate::core::EntityId;
use crate::timeline::Millis;

/// The independent effect slots of a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectKind {
    /// Attacker highlight during an attack traversal.
    AttackSource,
    /// Defender highlight during an attack traversal.
    AttackTarget,
    /// Damage or heal flash.
    HitFlash,
    /// Floating damage/heal number.
    FloatingNumber,
    /// Spell-impact pulse.
    SpellImpact,
    /// Death flourish.
    DeathFlourish,
}

impl EffectKind {
    /// Number of effect kinds.
    pub const COUNT: usize = 6;

    /// All effect kinds, in slot order.
    pub const ALL: [EffectKind; Self::COUNT] = [
        Self::AttackSource,
        Self::AttackTarget,
        Self::HitFlash,
        Self::FloatingNumber,
        Self::SpellImpact,
        Self::DeathFlourish,
    ];

    /// Slot index of this kind.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Whether a hit takes health away or gives it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitKind {
    Damage,
    Heal,
}

/// A floating damage/heal number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloatingNumber {
    pub kind: HitKind,
    /// Signed magnitude as reported by the event.
    pub magnitude: i64,
}

/// What a slot shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectPayload {
    /// On/off effect (attack highlights, death flourish).
    Marker,
    Hit(HitKind),
    Float(FloatingNumber),
    Impact(Polarity),
}

/// A live slot value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectSlot {
    pub token: EffectToken,
    pub payload: EffectPayload,
}

/// A planned effect: what to write, where, and for how long.
///
/// The token is minted when the effect is scheduled, not when it is planned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectSpec {
    pub target: EntityId,
    pub kind: EffectKind,
    pub payload: EffectPayload,
    /// How long the slot stays set once committed.
    pub duration: Millis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_indices_are_dense() {
        for (i, kind) in EffectKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(EffectKind::ALL.len(), EffectKind::COUNT);
    }

    #[test]
    fn test_payload_serialization() {
        let payload = EffectPayload::Float(FloatingNumber {
            kind: HitKind::Damage,
            magnitude: -3,
        });
        let json = serde_json::to_string(&payload).unwrap();
        let deserialized: EffectPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(payload, deserialized);
    }
}
