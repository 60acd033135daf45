//! Game event types.
//!
//! Events are produced by the remote rules engine and delivered with every
//! action response. The choreography engine reads them and never mutates
//! them.
//!
//! ## Event Data
//!
//! - `event_type`: What kind of event this is (closed set)
//! - `source_id`: The entity or card that caused the event (if any)
//! - `target_id`: The entity affected by the event (if any)
//! - `value`: Signed magnitude (damage amount, buff size, ...), default 0
//! - `message`: Display text for the event log
//!
//! Which slot names the "subject" depends on the type: a `DEATH` or
//! `SUMMON` names its creature in `source_id`, while `DAMAGE`, `HEAL`,
//! `BUFF` and `FREEZE` name it in `target_id`.

use serde::{Deserialize, Serialize};

use crate::core::EntityId;

/// The closed set of event kinds the rules engine emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEventType {
    Attack,
    Damage,
    Heal,
    Death,
    CardPlayed,
    CardDrawn,
    SpellResolved,
    Summon,
    Buff,
    Freeze,
    TurnStart,
    ManaGain,
    Fatigue,
    GameOver,
}

impl GameEventType {
    /// Events that always push the timeline forward.
    #[must_use]
    pub const fn is_combat_beat(self) -> bool {
        matches!(self, Self::Attack | Self::Damage | Self::Heal)
    }

    /// Events that push the timeline forward while a spell is resolving.
    #[must_use]
    pub const fn is_spell_beat(self) -> bool {
        matches!(self, Self::Buff | Self::Freeze | Self::Death | Self::Summon)
    }
}

/// A single event from the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    /// The type of event.
    #[serde(rename = "type")]
    pub event_type: GameEventType,

    /// The entity or card that caused/initiated the event.
    #[serde(default)]
    pub source_id: Option<EntityId>,

    /// The entity that was affected by the event.
    #[serde(default)]
    pub target_id: Option<EntityId>,

    /// Signed magnitude.
    #[serde(default)]
    pub value: i64,

    /// Display text.
    #[serde(default)]
    pub message: String,
}

impl GameEvent {
    /// Create a new event with just a type.
    pub fn new(event_type: GameEventType) -> Self {
        Self {
            event_type,
            source_id: None,
            target_id: None,
            value: 0,
            message: String::new(),
        }
    }

    /// Set the source id (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: impl Into<EntityId>) -> Self {
        self.source_id = Some(source.into());
        self
    }

    /// Set the target id (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: impl Into<EntityId>) -> Self {
        self.target_id = Some(target.into());
        self
    }

    /// Set the value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }

    /// Set the display message (builder pattern).
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Builders mirroring what the rules engine emits.
impl GameEvent {
    pub fn attack(attacker: impl Into<EntityId>, target: impl Into<EntityId>) -> Self {
        Self::new(GameEventType::Attack)
            .with_source(attacker)
            .with_target(target)
    }

    pub fn damage(target: impl Into<EntityId>, amount: i64) -> Self {
        Self::new(GameEventType::Damage)
            .with_target(target)
            .with_value(amount)
    }

    pub fn heal(target: impl Into<EntityId>, amount: i64) -> Self {
        Self::new(GameEventType::Heal)
            .with_target(target)
            .with_value(amount)
    }

    /// The dying creature is reported as the source.
    pub fn death(creature: impl Into<EntityId>) -> Self {
        Self::new(GameEventType::Death).with_source(creature)
    }

    /// The played card's definition id is reported as the source.
    pub fn card_played(card: impl Into<EntityId>) -> Self {
        Self::new(GameEventType::CardPlayed).with_source(card)
    }

    pub fn spell_resolved(card: impl Into<EntityId>) -> Self {
        Self::new(GameEventType::SpellResolved).with_source(card)
    }

    /// The summoned creature is reported as the source.
    pub fn summon(creature: impl Into<EntityId>) -> Self {
        Self::new(GameEventType::Summon).with_source(creature)
    }

    pub fn buff(target: impl Into<EntityId>, amount: i64) -> Self {
        Self::new(GameEventType::Buff)
            .with_target(target)
            .with_value(amount)
    }

    pub fn freeze(target: impl Into<EntityId>) -> Self {
        Self::new(GameEventType::Freeze).with_target(target)
    }

    /// Fatigue names the damaged hero as the source.
    pub fn fatigue(hero: impl Into<EntityId>, damage: i64) -> Self {
        Self::new(GameEventType::Fatigue)
            .with_source(hero)
            .with_value(damage)
    }

    pub fn turn_start(player: impl Into<EntityId>, turn: i64) -> Self {
        Self::new(GameEventType::TurnStart)
            .with_source(player)
            .with_value(turn)
    }
}
