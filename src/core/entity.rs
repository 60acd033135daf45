//! Entity and card identification.
//!
//! The rules engine names every object with an opaque string: board
//! creatures and heroes get an [`EntityId`], card definitions a [`CardId`].
//! The choreography engine never parses these ids. It only compares them.
//!
//! ## Placeholder ids
//!
//! Some events carry a non-unique sentinel instead of a real id (a summoned
//! token that had no id yet is reported as `"token"`). Such ids can name
//! several entities at once, so anything that must animate exactly one
//! entity checks [`EntityId::is_placeholder`] first.
//!
//! ```
//! use ccg_choreo::core::EntityId;
//!
//! let wolf = EntityId::new("c-17");
//! let token = EntityId::new("token");
//!
//! let placeholders = ["token".to_string()];
//! assert!(!wolf.is_placeholder(&placeholders));
//! assert!(token.is_placeholder(&placeholders));
//! ```

use serde::{Deserialize, Serialize};

/// Identifier for anything an effect can land on: a creature or a hero.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Create an entity ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this id is one of the shared sentinel ids.
    #[must_use]
    pub fn is_placeholder(&self, placeholders: &[String]) -> bool {
        placeholders.iter().any(|p| p == &self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Identifier for a card definition (what `CARD_PLAYED` reports).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// `CARD_PLAYED` reports the card id in the event's source slot.
impl From<&EntityId> for CardId {
    fn from(id: &EntityId) -> Self {
        Self(id.0.clone())
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_equality() {
        assert_eq!(EntityId::new("a"), EntityId::from("a"));
        assert_ne!(EntityId::new("a"), EntityId::new("b"));
        assert_eq!(EntityId::new("abc").as_str(), "abc");
    }

    #[test]
    fn test_placeholder() {
        let placeholders = vec!["token".to_string(), "self".to_string()];
        assert!(EntityId::new("token").is_placeholder(&placeholders));
        assert!(EntityId::new("self").is_placeholder(&placeholders));
        assert!(!EntityId::new("c-1").is_placeholder(&placeholders));
        assert!(!EntityId::new("token").is_placeholder(&[]));
    }

    #[test]
    fn test_card_id_from_entity() {
        let source = EntityId::new("card-9");
        assert_eq!(CardId::from(&source), CardId::new("card-9"));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId::new("c-42")), "Entity(c-42)");
        assert_eq!(format!("{}", CardId::new("fireball")), "Card(fireball)");
    }

    #[test]
    fn test_serialization_is_transparent() {
        let id = EntityId::new("c-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"c-123\"");
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
