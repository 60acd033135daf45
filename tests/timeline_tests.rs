//! Stagger planning integration tests.

use ccg_choreo::board::{BoardCreature, BoardSnapshot, SideState};
use ccg_choreo::cards::{CardDefinition, CardRegistry};
use ccg_choreo::core::{ChoreoConfig, EntityId};
use ccg_choreo::effects::{EffectKind, HitKind};
use ccg_choreo::events::GameEvent;
use ccg_choreo::session::ChoreoSession;
use ccg_choreo::timeline::{PlannedAction, TimelinePlanner};

fn cards() -> CardRegistry {
    [
        CardDefinition::spell("frost", "Frost Nova", "Freeze all enemy creatures"),
        CardDefinition::spell("rally", "Rally", "Summon two 1/1 tokens"),
    ]
    .into_iter()
    .collect()
}

fn board() -> BoardSnapshot {
    BoardSnapshot::new(
        SideState::new("me").with_creature(BoardCreature::new("X", "x", 3, 3, 0)),
        SideState::new("them").with_creature(BoardCreature::new("Y", "y", 2, 4, 0)),
    )
}

/// [ATTACK(X->Y), DAMAGE(Y,3), DAMAGE(X,0)] gives 0, 280, nothing.
#[test]
fn test_attack_damage_stagger() {
    let events = vec![
        GameEvent::attack("X", "Y"),
        GameEvent::damage("Y", 3),
        GameEvent::damage("X", 0),
    ];
    let plan = TimelinePlanner::new(ChoreoConfig::default()).plan(&events, &cards(), &board());

    let attack: Vec<_> = plan.for_event(0).map(|e| e.delay).collect();
    assert_eq!(attack, vec![0, 0]);

    let damage: Vec<_> = plan.for_event(1).map(|e| e.delay).collect();
    assert_eq!(damage, vec![280, 280]);

    assert_eq!(plan.for_event(2).count(), 0);
    assert_eq!(plan.end_delay, 840);
}

/// The same batch through a session, observed on the clock.
#[test]
fn test_stagger_observed_in_session() {
    let mut session = ChoreoSession::default();
    let events = vec![
        GameEvent::attack("X", "Y"),
        GameEvent::damage("Y", 3),
        GameEvent::damage("X", 0),
    ];
    session.ingest(&events, &board(), &cards());

    session.advance(0);
    assert!(session.attack_source_token(&EntityId::new("X")).is_some());
    assert!(session.attack_target_token(&EntityId::new("Y")).is_some());
    assert_eq!(session.hit_flash(&EntityId::new("Y")), None);

    session.advance(279);
    assert_eq!(session.hit_flash(&EntityId::new("Y")), None);

    session.advance(1);
    assert_eq!(session.hit_flash(&EntityId::new("Y")), Some(HitKind::Damage));
    assert_eq!(session.floating_number(&EntityId::new("Y")).map(|f| f.magnitude), Some(3));

    session.advance(5000);
    assert_eq!(session.hit_flash(&EntityId::new("X")), None);
    assert_eq!(session.floating_number(&EntityId::new("X")), None);
}

/// Effects of a later event never come before a staggered earlier one.
#[test]
fn test_causal_order_across_spell_window() {
    let events = vec![
        GameEvent::card_played("frost"),
        GameEvent::freeze("a"),
        GameEvent::freeze("b"),
        GameEvent::freeze("c"),
        GameEvent::attack("X", "Y"),
        GameEvent::damage("Y", 3),
    ];
    let plan = TimelinePlanner::new(ChoreoConfig::default()).plan(&events, &cards(), &board());

    let pulses: Vec<_> = plan
        .entries
        .iter()
        .filter_map(|e| e.effect().filter(|s| s.kind == EffectKind::SpellImpact).map(|_| e.delay))
        .collect();
    // The window stays open past the attack, so Y's damage pulses too.
    assert_eq!(pulses, vec![0, 280, 560, 1120]);

    let attack = plan.for_event(4).next().unwrap();
    assert_eq!(attack.delay, 840);
    assert_eq!(plan.for_event(5).next().unwrap().delay, 1120);
}

/// Placeholder summons stagger but never pulse.
#[test]
fn test_placeholder_summons() {
    let events = vec![
        GameEvent::card_played("rally"),
        GameEvent::summon("token"),
        GameEvent::summon("token"),
    ];
    let plan = TimelinePlanner::new(ChoreoConfig::default()).plan(&events, &cards(), &board());

    assert!(plan.entries.is_empty());
    assert_eq!(plan.end_delay, 560);
}

/// A custom stagger step is honored.
#[test]
fn test_custom_stagger_step() {
    let config = ChoreoConfig::default().with_stagger_step(100);
    let events = vec![GameEvent::damage("a", 1), GameEvent::damage("b", 1), GameEvent::death("b")];
    let plan = TimelinePlanner::new(config).plan(&events, &cards(), &board());

    let death = plan
        .entries
        .iter()
        .find(|e| matches!(e.action, PlannedAction::Death { .. }))
        .unwrap();
    assert_eq!(death.delay, 200);
}
