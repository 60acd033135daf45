//! Session composition: the choreography pipeline for one match view.
//!
//! ```
//! use ccg_choreo::board::{BoardCreature, BoardSnapshot, Side, SideState};
//! use ccg_choreo::cards::CardRegistry;
//! use ccg_choreo::events::GameEvent;
//! use ccg_choreo::session::ChoreoSession;
//!
//! let mut session = ChoreoSession::default();
//! let cards = CardRegistry::new();
//!
//! let before = BoardSnapshot::new(
//!     SideState::new("me"),
//!     SideState::new("them").with_creature(BoardCreature::new("imp", "imp-card", 1, 1, 0)),
//! );
//! session.ingest(&[], &before, &cards);
//!
//! let log = vec![GameEvent::death("imp")];
//! let after = BoardSnapshot::new(SideState::new("me"), SideState::new("them"));
//! session.ingest(&log, &after, &cards);
//!
//! // Still drawn while it dies.
//! assert!(session.rendered(Side::Opponent)[0].is_dying);
//! assert!(session.interaction_locked());
//!
//! session.advance(session.config().death_sequence_length());
//! assert!(session.rendered(Side::Opponent).is_empty());
//! assert!(!session.interaction_locked());
//! ```

mod gate;
mod mirror;
#[allow(clippy::module_inception)]
mod session;
mod stats;

pub use gate::{ActionTransport, InteractionGate, PlayerAction, RejectReason, SubmitOutcome};
pub use mirror::{ActionResponse, GameMirror};
pub use session::ChoreoSession;
pub use stats::SessionStats;
