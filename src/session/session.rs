//! The choreography session.
//!
//! A [`ChoreoSession`] owns every piece of mutable choreography state for
//! one match view: the event cursor, the task queue, the effect store, the
//! death sequences and the reconciler. The host drives it with two calls:
//!
//! - [`ChoreoSession::ingest`] whenever a response arrives
//! - [`ChoreoSession::advance`] as time passes
//!
//! Ingest plans the new events and queues their work. Queued work only runs
//! inside `advance`, in due order.

use im::Vector;

use super::gate::{ActionTransport, InteractionGate, PlayerAction, SubmitOutcome};
use super::stats::SessionStats;
use crate::board::{BattlefieldReconciler, BoardHistory, BoardSnapshot, RenderedEntity, Side};
use crate::cards::{CardLookup, Polarity};
use crate::core::{ChoreoConfig, EntityId};
use crate::death::{DeathOrchestrator, DeathPhase, HitLog};
use crate::effects::{
    EffectKind, EffectPayload, EffectSpec, EffectStore, EffectToken, FloatingNumber, HitKind, TokenMint,
};
use crate::error::Result;
use crate::events::{EventDeltaTracker, GameEvent};
use crate::timeline::{Millis, PlannedAction, Task, TaskQueue, TimelinePlanner};

/// Choreography state for one match view.
#[derive(Clone, Debug)]
pub struct ChoreoSession {
    config: ChoreoConfig,
    planner: TimelinePlanner,
    tracker: EventDeltaTracker,
    queue: TaskQueue,
    mint: TokenMint,
    effects: EffectStore,
    deaths: DeathOrchestrator,
    hits: HitLog,
    reconciler: BattlefieldReconciler,
    gate: InteractionGate,
    /// Last ingested snapshot.
    board: Option<BoardSnapshot>,
    now: Millis,
    stats: SessionStats,
}

impl ChoreoSession {
    /// Create a session. Fails if the config does not validate.
    pub fn new(config: ChoreoConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::unchecked(config))
    }

    fn unchecked(config: ChoreoConfig) -> Self {
        Self {
            planner: TimelinePlanner::new(config.clone()),
            config,
            tracker: EventDeltaTracker::new(),
            queue: TaskQueue::new(),
            mint: TokenMint::new(),
            effects: EffectStore::new(),
            deaths: DeathOrchestrator::new(),
            hits: HitLog::new(),
            reconciler: BattlefieldReconciler::new(),
            gate: InteractionGate::new(),
            board: None,
            now: 0,
            stats: SessionStats::new(),
        }
    }

    // === Input ===

    /// Take in the full event log and the snapshot that came with it.
    ///
    /// Only events past the cursor are planned. A log shorter than the
    /// cursor restarts the whole timeline from zero.
    pub fn ingest(&mut self, log: &[GameEvent], snapshot: &BoardSnapshot, cards: &dyn CardLookup) {
        if self.gate.is_closed() {
            return;
        }

        let delta = self.tracker.delta(log);
        if delta.reset {
            self.reset_timeline();
        }
        self.stats.events_ingested += delta.events.len() as u64;

        let plan = {
            let history = BoardHistory::new(snapshot, self.board.as_ref());
            self.planner.plan(delta.events, cards, &history)
        };

        let now = self.now;
        self.hits.prune(now.saturating_sub(self.config.coincidence_window));
        for (target, delay) in plan.damage_hits() {
            self.hits.record(target, now + delay);
        }

        for entry in plan.entries {
            let at = now + entry.delay;
            match entry.action {
                PlannedAction::Effect(spec) => {
                    self.schedule_at(&spec, at);
                }
                PlannedAction::Death { entity } => self.begin_death(&entity, at),
            }
        }

        self.board = Some(snapshot.clone());
        self.render();
    }

    /// A response to a submitted action arrived.
    pub fn receive(&mut self, log: &[GameEvent], snapshot: &BoardSnapshot, cards: &dyn CardLookup) {
        self.gate.end_round_trip();
        self.ingest(log, snapshot, cards);
    }

    /// A submitted action failed before any response arrived.
    pub fn fail_round_trip(&mut self) {
        self.gate.end_round_trip();
    }

    // === Time ===

    /// Advance the clock by `dt`, running everything that comes due.
    pub fn advance(&mut self, dt: Millis) {
        self.advance_to(self.now.saturating_add(dt));
    }

    /// Advance the clock to `target`. The clock never moves backwards.
    pub fn advance_to(&mut self, target: Millis) {
        if self.gate.is_closed() || target < self.now {
            return;
        }
        while let Some((at, _, task)) = self.queue.pop_due(target) {
            self.now = at;
            self.run(task);
        }
        self.now = target;
    }

    /// Cancel all outstanding work. Every later call is a no-op.
    pub fn teardown(&mut self) {
        if self.gate.is_closed() {
            return;
        }
        let cancelled = self.queue.cancel_all();
        self.gate.close();
        tracing::debug!(target: "choreo::session", cancelled, "session torn down");
    }

    /// Start over for a new match without waiting for a shorter log.
    pub fn reset(&mut self) {
        if self.gate.is_closed() {
            return;
        }
        self.tracker.reset();
        self.reset_timeline();
        self.render();
    }

    // === Scheduling ===

    /// Schedule an effect `delay` from now.
    ///
    /// The token is minted immediately. The slot is written at
    /// `now + delay` and cleared at `now + delay + duration`, unless a newer
    /// effect has taken it by then.
    pub fn schedule(&mut self, spec: &EffectSpec, delay: Millis) -> Option<EffectToken> {
        if self.gate.is_closed() {
            return None;
        }
        Some(self.schedule_at(spec, self.now + delay))
    }

    fn schedule_at(&mut self, spec: &EffectSpec, at: Millis) -> EffectToken {
        let token = self.mint.mint();
        self.queue.schedule(
            at,
            Task::Commit {
                target: spec.target.clone(),
                kind: spec.kind,
                payload: spec.payload,
                token,
            },
        );
        self.queue.schedule(
            at + spec.duration,
            Task::Clear {
                target: spec.target.clone(),
                kind: spec.kind,
                token,
            },
        );
        self.stats.effects_scheduled += 1;
        token
    }

    fn begin_death(&mut self, entity: &EntityId, at: Millis) {
        if !self.deaths.begin(entity, at) {
            self.stats.duplicate_deaths += 1;
            return;
        }
        self.stats.deaths_started += 1;

        let last_known = self
            .reconciler
            .find(entity)
            .map(|(side, rendered)| (side, rendered.creature.clone()))
            .or_else(|| {
                self.board
                    .as_ref()
                    .and_then(|board| board.find_creature(entity))
                    .map(|(side, creature)| (side, creature.clone()))
            });
        match last_known {
            Some((side, creature)) => {
                self.reconciler.pin(side, &creature);
            }
            None => {
                tracing::debug!(target: "choreo::death", %entity, "no last-known attributes, nothing to pin");
            }
        }

        self.queue.schedule(at, Task::DeathHit { entity: entity.clone() });
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::Commit { target, kind, payload, token } => {
                // Effects scheduled before a removal died with the entity.
                if self.deaths.admits(&target, token) {
                    self.effects.commit(&target, kind, payload, token);
                }
            }
            Task::Clear { target, kind, token } => {
                self.effects.clear_if(&target, kind, token);
            }
            Task::DeathHit { entity } => {
                if !self.deaths.hit_held(&entity) {
                    return;
                }
                if !self.hits.has_hit_near(&entity, self.now, self.config.coincidence_window) {
                    let hit = EffectSpec {
                        target: entity.clone(),
                        kind: EffectKind::HitFlash,
                        payload: EffectPayload::Hit(HitKind::Damage),
                        duration: self.config.hit_flash_duration,
                    };
                    self.schedule_at(&hit, self.now);
                    self.stats.synthetic_hits += 1;
                    tracing::trace!(target: "choreo::death", %entity, "synthetic hit");
                }
                self.queue
                    .schedule(self.now + self.config.death_hit_hold, Task::DeathFlourish { entity });
            }
            Task::DeathFlourish { entity } => {
                if self.deaths.phase(&entity) != DeathPhase::HitHeld {
                    return;
                }
                let token = self.mint.mint();
                self.deaths.flourishing(&entity, token);
                self.effects
                    .commit(&entity, EffectKind::DeathFlourish, EffectPayload::Marker, token);
                let remove_at = self.now + self.config.death_flourish_duration + self.config.death_cleanup_grace;
                self.queue.schedule(remove_at, Task::DeathRemove { entity, token });
            }
            Task::DeathRemove { entity, token } => {
                self.effects.clear_if(&entity, EffectKind::DeathFlourish, token);
                let high_water = self.mint.last().unwrap_or(token);
                if self.deaths.remove(&entity, token, high_water) {
                    self.effects.purge(&entity);
                    self.reconciler.unpin(&entity);
                    self.stats.deaths_completed += 1;
                    self.render();
                }
            }
        }
    }

    fn reset_timeline(&mut self) {
        let cancelled = self.queue.cancel_all();
        self.effects.clear();
        self.deaths.clear();
        self.hits.clear();
        self.reconciler.clear();
        self.board = None;
        self.stats.resets += 1;
        tracing::debug!(target: "choreo::session", cancelled, "timeline reset");
    }

    fn render(&mut self) {
        for side in Side::BOTH {
            let authoritative = self
                .board
                .as_ref()
                .map_or(&[][..], |board| board.side(side).battlefield.as_slice());
            self.reconciler.render(side, authoritative);
        }
    }

    // === User actions ===

    /// Send `action` unless interaction is locked.
    pub fn submit(&mut self, action: PlayerAction, transport: &mut dyn ActionTransport) -> SubmitOutcome {
        if let Some(reason) = self.gate.check(self.deaths.active_count()) {
            tracing::debug!(target: "choreo::gate", ?action, ?reason, "action rejected");
            return SubmitOutcome::Rejected(reason);
        }
        transport.send(&action);
        self.gate.begin_round_trip();
        SubmitOutcome::Dispatched
    }

    /// Check if user actions are currently refused.
    #[must_use]
    pub fn interaction_locked(&self) -> bool {
        self.gate.check(self.deaths.active_count()).is_some()
    }

    #[must_use]
    pub fn round_trip_pending(&self) -> bool {
        self.gate.round_trip_pending()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.gate.is_closed()
    }

    // === Output ===

    /// What the view should draw for one side.
    #[must_use]
    pub fn rendered(&self, side: Side) -> &Vector<RenderedEntity> {
        self.reconciler.rendered(side)
    }

    /// Check if an entity is in a running death sequence.
    #[must_use]
    pub fn is_dying(&self, entity: &EntityId) -> bool {
        self.deaths.is_active(entity)
    }

    #[must_use]
    pub fn death_phase(&self, entity: &EntityId) -> DeathPhase {
        self.deaths.phase(entity)
    }

    #[must_use]
    pub fn active_death_sequences(&self) -> usize {
        self.deaths.active_count()
    }

    #[must_use]
    pub fn effects(&self) -> &EffectStore {
        &self.effects
    }

    #[must_use]
    pub fn attack_source_token(&self, entity: &EntityId) -> Option<EffectToken> {
        self.effects.attack_source_token(entity)
    }

    #[must_use]
    pub fn attack_target_token(&self, entity: &EntityId) -> Option<EffectToken> {
        self.effects.attack_target_token(entity)
    }

    #[must_use]
    pub fn hit_flash(&self, entity: &EntityId) -> Option<HitKind> {
        self.effects.hit_flash(entity)
    }

    #[must_use]
    pub fn floating_number(&self, entity: &EntityId) -> Option<FloatingNumber> {
        self.effects.floating_number(entity)
    }

    #[must_use]
    pub fn spell_impact(&self, entity: &EntityId) -> Option<Polarity> {
        self.effects.spell_impact(entity)
    }

    #[must_use]
    pub fn death_flourish(&self, entity: &EntityId) -> Option<EffectToken> {
        self.effects.death_flourish(entity)
    }

    /// Outstanding deferred tasks.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    /// When the next deferred task comes due.
    #[must_use]
    pub fn next_due(&self) -> Option<Millis> {
        self.queue.next_due()
    }

    /// Events of the log already processed.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.tracker.cursor()
    }

    #[must_use]
    pub fn now(&self) -> Millis {
        self.now
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn config(&self) -> &ChoreoConfig {
        &self.config
    }
}

/// A session with the default config, which always validates.
impl Default for ChoreoSession {
    fn default() -> Self {
        Self::unchecked(ChoreoConfig::default())
    }
}
