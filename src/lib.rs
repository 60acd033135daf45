//! # ccg-choreo
//!
//! Combat effect choreography for card game clients.
//!
//! The rules engine reports what happened as a growing event log plus a
//! full board snapshot. This crate turns each new batch of events into a
//! staggered timeline of short-lived visual effect state, and keeps dying
//! creatures on screen until their death animation has played out.
//!
//! ## Design Principles
//!
//! 1. **Virtual Time**: All deferred work is data in an owned task queue.
//!    Nothing happens until the host advances the clock, so timelines are
//!    deterministic and testable.
//!
//! 2. **Token-Guarded State**: Every effect instance is stamped with a fresh
//!    token. A deferred clear only applies if its token is still the stored
//!    one, so overlapping effects on one target never clobber each other.
//!
//! 3. **Alive vs Drawn**: The snapshot decides what is alive. A separate
//!    pinned set decides what is still drawn.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, configuration
//! - `cards`: Card definitions and spell classification
//! - `events`: Game events, incremental log consumption
//! - `effects`: Effect kinds, tokens, the effect store
//! - `timeline`: Stagger planning and the deferred task queue
//! - `death`: Death sequence state machine
//! - `board`: Snapshots and battlefield reconciliation
//! - `session`: The composed pipeline and the interaction gate

pub mod core;
pub mod error;
pub mod cards;
pub mod events;
pub mod effects;
pub mod timeline;
pub mod death;
pub mod board;
pub mod session;

// Re-export commonly used types
pub use crate::core::{CardId, ChoreoConfig, EntityId};

pub use crate::error::{ChoreoError, Result};

pub use crate::cards::{classify_rules_text, CardDefinition, CardLookup, CardRegistry, CardType, Polarity};

pub use crate::events::{Delta, EventDeltaTracker, GameEvent, GameEventType};

pub use crate::effects::{
    EffectKind, EffectPayload, EffectRecord, EffectSlot, EffectSpec, EffectStore,
    EffectToken, FloatingNumber, HitKind, TokenMint,
};

pub use crate::timeline::{Millis, Plan, PlannedAction, PlannedEffect, Task, TaskQueue, TimelinePlanner, TimerHandle};

pub use crate::death::{DeathOrchestrator, DeathPhase, DeathSequence, HitLog};

pub use crate::board::{
    merge, BattlefieldReconciler, BoardCreature, BoardHistory, BoardSnapshot, BoardView,
    Keyword, PinnedEntity, RenderedEntity, Side, SideState, Status,
};

pub use crate::session::{
    ActionResponse, ActionTransport, ChoreoSession, GameMirror, PlayerAction,
    RejectReason, SessionStats, SubmitOutcome,
};
