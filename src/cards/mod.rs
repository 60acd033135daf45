//! Card catalog access.
//!
//! - `CardDefinition`: the catalog entry (type, rules text)
//! - `CardLookup`: lookup seam used while planning a timeline
//! - `CardRegistry`: in-memory catalog

mod definition;
mod registry;

pub use definition::{classify_rules_text, CardDefinition, CardType, Polarity};
pub use registry::{CardLookup, CardRegistry};
