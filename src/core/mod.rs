//! Core engine types: identifiers and timing configuration.

pub mod entity;
pub mod config;

pub use entity::{CardId, EntityId};
pub use config::ChoreoConfig;
