//! Transient effect state.
//!
//! ## Key Components
//!
//! - [`EffectKind`]: the independent per-target slots
//! - [`EffectPayload`]: what a slot shows
//! - [`EffectToken`] / [`TokenMint`]: staleness stamps
//! - [`EffectStore`]: token-guarded commit and clear
//!
//! The store never decides *when* something happens; the session commits
//! and clears slots as the task queue comes due.

mod effect;
mod store;
mod token;

pub use effect::{EffectKind, EffectPayload, EffectSlot, EffectSpec, FloatingNumber, HitKind};
pub use store::{EffectRecord, EffectStore};
pub use token::{EffectToken, TokenMint};
