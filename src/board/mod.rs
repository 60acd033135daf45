//! Battlefield state: authoritative snapshots and the reconciled render list.
//!
//! - [`BoardSnapshot`]: what the rules engine says is on the board
//! - [`BattlefieldReconciler`]: what the view should draw, including
//!   creatures still playing their death animation

mod creature;
mod reconciler;
mod snapshot;

pub use creature::{BoardCreature, Keyword, Status};
pub use reconciler::{merge, BattlefieldReconciler, PinnedEntity, RenderedEntity};
pub use snapshot::{BoardHistory, BoardSnapshot, BoardView, Side, SideState};
