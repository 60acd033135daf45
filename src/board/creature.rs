//! Board creatures as reported by the authoritative snapshot.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CardId, EntityId};

/// Creature keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Keyword {
    Guard,
    Charge,
    Lifesteal,
    Ward,
}

/// Temporary creature statuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Frozen,
}

/// A creature on one side of the battlefield.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCreature {
    /// Instance id (what events name).
    pub instance_id: EntityId,

    /// Card definition this creature was summoned from.
    pub card_id: CardId,

    pub attack: i64,
    pub health: i64,
    pub max_health: i64,

    /// Eligible to attack right now.
    #[serde(default)]
    pub can_attack: bool,

    #[serde(default)]
    pub has_attacked_this_turn: bool,

    #[serde(default)]
    pub keywords: SmallVec<[Keyword; 4]>,

    #[serde(default)]
    pub statuses: SmallVec<[Status; 2]>,

    /// Board slot, left to right.
    pub position: u32,
}

impl BoardCreature {
    /// Create a creature with the given stats at `position`.
    #[must_use]
    pub fn new(
        instance_id: impl Into<EntityId>,
        card_id: impl Into<String>,
        attack: i64,
        health: i64,
        position: u32,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            card_id: CardId::new(card_id),
            attack,
            health,
            max_health: health,
            can_attack: false,
            has_attacked_this_turn: false,
            keywords: SmallVec::new(),
            statuses: SmallVec::new(),
            position,
        }
    }

    /// Mark the creature able to attack (builder pattern).
    #[must_use]
    pub fn ready(mut self) -> Self {
        self.can_attack = true;
        self
    }

    /// Add a keyword (builder pattern).
    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    /// Add a status (builder pattern).
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        if !self.statuses.contains(&status) {
            self.statuses.push(status);
        }
        self
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.statuses.contains(&Status::Frozen)
    }

    /// Last-known copy for a dying creature: same stats, attack
    /// eligibility flags forced off.
    #[must_use]
    pub fn frozen_for_death(&self) -> Self {
        Self {
            can_attack: false,
            has_attacked_this_turn: false,
            ..self.clone()
        }
    }
}
