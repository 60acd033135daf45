//! Benchmarks for planning and running long event logs.

use ccg_choreo::{
    BoardCreature, BoardSnapshot, CardDefinition, CardRegistry, ChoreoConfig, ChoreoSession, GameEvent, SideState,
    TimelinePlanner,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn cards() -> CardRegistry {
    [
        CardDefinition::spell("bolt", "Firebolt", "Deal 2 damage to a creature"),
        CardDefinition::spell("mend", "Mend", "Heal a creature for 2"),
        CardDefinition::creature("wolf", "Grey Wolf"),
    ]
    .into_iter()
    .collect()
}

fn board(creatures: usize) -> BoardSnapshot {
    let side = |hero: &str, prefix: &str| {
        (0..creatures).fold(SideState::new(hero), |state, i| {
            state.with_creature(BoardCreature::new(format!("{prefix}{i}"), "wolf", 2, 3, i as u32))
        })
    };
    BoardSnapshot::new(side("p1", "a"), side("p2", "b"))
}

/// A combat-heavy log: attacks, spells and deaths over `turns` turns.
fn combat_log(turns: usize) -> Vec<GameEvent> {
    let mut log = Vec::new();
    for turn in 0..turns {
        let a = format!("a{}", turn % 7);
        let b = format!("b{}", turn % 7);
        log.push(GameEvent::turn_start("p1", turn as i64));
        log.push(GameEvent::attack(a.as_str(), b.as_str()));
        log.push(GameEvent::damage(b.as_str(), 2));
        log.push(GameEvent::damage(a.as_str(), 2));
        log.push(GameEvent::card_played("bolt"));
        log.push(GameEvent::damage(b.as_str(), 2));
        log.push(GameEvent::death(b.as_str()));
        log.push(GameEvent::card_played("mend"));
        log.push(GameEvent::heal(a.as_str(), 2));
        log.push(GameEvent::attack(a.as_str(), "ENEMY_HERO"));
        log.push(GameEvent::damage("p2", 2));
    }
    log
}

fn bench_plan(c: &mut Criterion) {
    let planner = TimelinePlanner::new(ChoreoConfig::default());
    let cards = cards();
    let board = board(7);

    let mut group = c.benchmark_group("plan");
    for turns in [10, 100, 1000] {
        let log = combat_log(turns);
        group.throughput(Throughput::Elements(log.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(turns), &log, |b, log| {
            b.iter(|| black_box(planner.plan(black_box(log), &cards, &board)));
        });
    }
    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let cards = cards();
    let before = board(7);
    let after = board(6);

    let mut group = c.benchmark_group("session");
    for turns in [10, 100] {
        let log = combat_log(turns);
        group.throughput(Throughput::Elements(log.len() as u64));
        group.bench_with_input(BenchmarkId::new("ingest_and_drain", turns), &log, |b, log| {
            b.iter(|| {
                let mut session = ChoreoSession::default();
                session.ingest(&[], &before, &cards);
                session.ingest(log, &after, &cards);
                while let Some(due) = session.next_due() {
                    session.advance_to(due);
                }
                black_box(session.stats().effects_scheduled)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_plan, bench_session);
criterion_main!(benches);
