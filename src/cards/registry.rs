//! Card lookup.
//!
//! The choreography engine asks the card catalog one question per
//! `CARD_PLAYED` event. [`CardLookup`] is that seam; [`CardRegistry`] is the
//! in-memory catalog the client fills once per session.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, Polarity};
use crate::core::CardId;

/// Read access to card definitions.
pub trait CardLookup {
    /// Get a card definition by ID.
    fn card(&self, id: &CardId) -> Option<&CardDefinition>;

    /// Spell polarity for a played card, or `None` if it is not a known spell.
    ///
    /// A missing card counts as "not a spell".
    fn spell_polarity(&self, id: &CardId) -> Option<Polarity> {
        self.card(id)
            .filter(|card| card.is_spell())
            .map(CardDefinition::polarity)
    }
}

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use ccg_choreo::cards::{CardDefinition, CardLookup, CardRegistry, Polarity};
/// use ccg_choreo::core::CardId;
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::spell("bolt", "Firebolt", "Deal 3 damage"));
///
/// assert_eq!(registry.spell_polarity(&CardId::new("bolt")), Some(Polarity::Harm));
/// assert_eq!(registry.spell_polarity(&CardId::new("missing")), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition, replacing any previous one with the same ID.
    pub fn register(&mut self, card: CardDefinition) {
        self.cards.insert(card.id.clone(), card);
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}

impl CardLookup for CardRegistry {
    fn card(&self, id: &CardId) -> Option<&CardDefinition> {
        self.cards.get(id)
    }
}

impl FromIterator<CardDefinition> for CardRegistry {
    fn from_iter<I: IntoIterator<Item = CardDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for card in iter {
            registry.register(card);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        assert!(registry.is_empty());

        registry.register(CardDefinition::creature("wolf", "Grey Wolf"));

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&CardId::new("wolf")));
        assert_eq!(registry.card(&CardId::new("wolf")).unwrap().name, "Grey Wolf");
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::creature("x", "Old"));
        registry.register(CardDefinition::creature("x", "New"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.card(&CardId::new("x")).unwrap().name, "New");
    }

    #[test]
    fn test_spell_polarity() {
        let registry: CardRegistry = [
            CardDefinition::spell("bolt", "Firebolt", "Deal 3 damage"),
            CardDefinition::spell("mend", "Mend", "Heal a creature for 4"),
            CardDefinition::creature("wolf", "Grey Wolf"),
        ]
        .into_iter()
        .collect();

        assert_eq!(registry.spell_polarity(&CardId::new("bolt")), Some(Polarity::Harm));
        assert_eq!(registry.spell_polarity(&CardId::new("mend")), Some(Polarity::Benefit));
        assert_eq!(registry.spell_polarity(&CardId::new("wolf")), None);
        assert_eq!(registry.spell_polarity(&CardId::new("nope")), None);
    }
}
