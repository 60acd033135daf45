//! Stagger planning.
//!
//! The planner turns a batch of new events into a timeline of effects. It
//! walks the batch in log order with a running delay that starts at zero.
//! Each event's effects are placed at the current delay; afterwards the
//! delay grows by one stagger step if the event is a beat:
//!
//! - ATTACK, DAMAGE and HEAL are always beats
//! - BUFF, FREEZE, DEATH and SUMMON are beats while a spell is resolving
//!
//! A spell is resolving when the most recent CARD_PLAYED of the batch named
//! a spell card. Only a CARD_PLAYED changes that; a non-spell one ends it.
//!
//! Planning is pure: nothing is scheduled and no token is minted here.

use serde::{Deserialize, Serialize};

use super::Millis;
use crate::board::BoardView;
use crate::cards::{CardLookup, Polarity};
use crate::core::{CardId, ChoreoConfig, EntityId};
use crate::effects::{EffectKind, EffectPayload, EffectSpec, FloatingNumber, HitKind};
use crate::events::{GameEvent, GameEventType};

/// What to do at a planned instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlannedAction {
    /// Write an effect slot, then clear it after its duration.
    Effect(EffectSpec),
    /// Start a death sequence.
    Death { entity: EntityId },
}

/// One entry of a planned timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedEffect {
    /// Offset from the start of the batch.
    pub delay: Millis,
    /// Index of the originating event within the batch.
    pub event_index: usize,
    pub action: PlannedAction,
}

impl PlannedEffect {
    /// The [`EffectSpec`], if this entry is a plain effect.
    #[must_use]
    pub fn effect(&self) -> Option<&EffectSpec> {
        match &self.action {
            PlannedAction::Effect(spec) => Some(spec),
            PlannedAction::Death { .. } => None,
        }
    }
}

/// A planned batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    /// Entries in non-decreasing delay order.
    pub entries: Vec<PlannedEffect>,
    /// Delay accumulated after the last event.
    pub end_delay: Millis,
}

impl Plan {
    /// Entries produced by one event of the batch.
    pub fn for_event(&self, index: usize) -> impl Iterator<Item = &PlannedEffect> {
        self.entries.iter().filter(move |entry| entry.event_index == index)
    }

    /// Visible damage hits, as (target, delay).
    pub fn damage_hits(&self) -> impl Iterator<Item = (&EntityId, Millis)> {
        self.entries.iter().filter_map(|entry| match entry.effect() {
            Some(spec)
                if spec.kind == EffectKind::HitFlash
                    && spec.payload == EffectPayload::Hit(HitKind::Damage) =>
            {
                Some((&spec.target, entry.delay))
            }
            _ => None,
        })
    }
}

/// Spell window state while walking a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpellWindow {
    #[default]
    Closed,
    /// A spell of this polarity is resolving.
    Open(Polarity),
}

impl SpellWindow {
    #[must_use]
    pub fn polarity(self) -> Option<Polarity> {
        match self {
            SpellWindow::Closed => None,
            SpellWindow::Open(polarity) => Some(polarity),
        }
    }
}

/// Builds timelines from event batches.
#[derive(Clone, Debug)]
pub struct TimelinePlanner {
    config: ChoreoConfig,
}

impl TimelinePlanner {
    #[must_use]
    pub fn new(config: ChoreoConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ChoreoConfig {
        &self.config
    }

    /// Plan a batch of new events.
    pub fn plan(&self, events: &[GameEvent], cards: &dyn CardLookup, board: &dyn BoardView) -> Plan {
        let mut plan = Plan::default();
        let mut delay: Millis = 0;
        let mut window = SpellWindow::Closed;

        for (index, event) in events.iter().enumerate() {
            window = Self::next_window(window, event, cards);

            let mut emit = |action: PlannedAction| {
                plan.entries.push(PlannedEffect {
                    delay,
                    event_index: index,
                    action,
                });
            };
            self.effects_for(event, window, board, &mut emit);

            let beat = event.event_type.is_combat_beat()
                || (window.polarity().is_some() && event.event_type.is_spell_beat());
            if beat {
                delay += self.config.stagger_step;
            }
        }

        plan.end_delay = delay;
        plan
    }

    fn next_window(window: SpellWindow, event: &GameEvent, cards: &dyn CardLookup) -> SpellWindow {
        match event.event_type {
            GameEventType::CardPlayed => event
                .source_id
                .as_ref()
                .and_then(|id| cards.spell_polarity(&CardId::from(id)))
                .map_or(SpellWindow::Closed, SpellWindow::Open),
            _ => window,
        }
    }

    fn effects_for(
        &self,
        event: &GameEvent,
        window: SpellWindow,
        board: &dyn BoardView,
        emit: &mut dyn FnMut(PlannedAction),
    ) {
        let config = &self.config;

        match event.event_type {
            GameEventType::Attack => {
                if let Some(source) = &event.source_id {
                    emit(self.effect(source, EffectKind::AttackSource, EffectPayload::Marker, config.attack_duration));
                }
                if let Some(target) = &event.target_id {
                    let target = self.resolve_attack_target(event.source_id.as_ref(), target, board);
                    emit(self.effect(&target, EffectKind::AttackTarget, EffectPayload::Marker, config.attack_duration));
                }
            }
            GameEventType::Damage | GameEventType::Heal => {
                let Some(target) = &event.target_id else {
                    return;
                };
                let kind = if event.event_type == GameEventType::Damage {
                    HitKind::Damage
                } else {
                    HitKind::Heal
                };
                self.hit(target, kind, event.value, emit);
                self.pulse(target, window, emit);
            }
            GameEventType::Buff | GameEventType::Freeze => {
                if let Some(target) = &event.target_id {
                    self.pulse(target, window, emit);
                }
            }
            GameEventType::Summon => {
                if let Some(creature) = &event.source_id {
                    self.pulse(creature, window, emit);
                }
            }
            GameEventType::Death => {
                let Some(creature) = &event.source_id else {
                    return;
                };
                if creature.is_placeholder(&config.placeholder_ids) {
                    tracing::trace!(target: "choreo::planner", %creature, "no death sequence for placeholder id");
                    return;
                }
                emit(PlannedAction::Death { entity: creature.clone() });
            }
            GameEventType::Fatigue => {
                if let Some(hero) = &event.source_id {
                    self.hit(hero, HitKind::Damage, event.value, emit);
                }
            }
            GameEventType::CardPlayed
            | GameEventType::CardDrawn
            | GameEventType::SpellResolved
            | GameEventType::TurnStart
            | GameEventType::ManaGain
            | GameEventType::GameOver => {}
        }
    }

    /// Hit flash plus floating number; nothing to show for a zero value.
    fn hit(&self, target: &EntityId, kind: HitKind, value: i64, emit: &mut dyn FnMut(PlannedAction)) {
        if value == 0 {
            return;
        }
        emit(self.effect(target, EffectKind::HitFlash, EffectPayload::Hit(kind), self.config.hit_flash_duration));
        emit(self.effect(
            target,
            EffectKind::FloatingNumber,
            EffectPayload::Float(FloatingNumber { kind, magnitude: value }),
            self.config.floating_number_duration,
        ));
    }

    /// Spell-impact pulse, only inside a spell window and never on a placeholder.
    fn pulse(&self, target: &EntityId, window: SpellWindow, emit: &mut dyn FnMut(PlannedAction)) {
        let Some(polarity) = window.polarity() else {
            return;
        };
        if target.is_placeholder(&self.config.placeholder_ids) {
            tracing::trace!(target: "choreo::planner", %target, "no pulse for placeholder id");
            return;
        }
        emit(self.effect(
            target,
            EffectKind::SpellImpact,
            EffectPayload::Impact(polarity),
            self.config.spell_impact_duration,
        ));
    }

    fn effect(&self, target: &EntityId, kind: EffectKind, payload: EffectPayload, duration: Millis) -> PlannedAction {
        PlannedAction::Effect(EffectSpec {
            target: target.clone(),
            kind,
            payload,
            duration,
        })
    }

    /// Map the enemy-hero alias to the hero across from the attacker.
    fn resolve_attack_target(&self, attacker: Option<&EntityId>, target: &EntityId, board: &dyn BoardView) -> EntityId {
        if target.as_str() != self.config.enemy_hero_alias {
            return target.clone();
        }
        attacker
            .and_then(|attacker| board.side_of(attacker))
            .and_then(|side| board.hero_id(side.opposite()))
            .cloned()
            .unwrap_or_else(|| target.clone())
    }
}
