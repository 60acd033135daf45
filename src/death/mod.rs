//! Death sequences and the synthetic-hit bookkeeping they need.

mod hits;
mod orchestrator;

pub use hits::HitLog;
pub use orchestrator::{DeathOrchestrator, DeathPhase, DeathSequence};
