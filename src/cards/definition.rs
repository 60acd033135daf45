//! Card definitions as the client sees them.
//!
//! The engine only needs two facts about a played card: whether it is a
//! spell, and whether its rules text reads as harmful or beneficial. The
//! latter is a plain keyword match, not rules interpretation.

use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// Card type reported by the card catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Creature,
    Spell,
}

/// Whether an effect helps or hurts what it lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Polarity {
    #[default]
    Benefit,
    Harm,
}

const HARM_WORDS: [&str; 3] = ["damage", "destroy", "freeze"];
const BENEFIT_WORDS: [&str; 3] = ["heal", "summon", "give"];

/// Classify rules text by keyword.
///
/// Harmful words win over beneficial ones; no text or no match reads as
/// beneficial.
///
/// ```
/// use ccg_choreo::cards::{classify_rules_text, Polarity};
///
/// assert_eq!(classify_rules_text(Some("Deal 3 damage.")), Polarity::Harm);
/// assert_eq!(classify_rules_text(Some("Heal your hero for 4.")), Polarity::Benefit);
/// assert_eq!(classify_rules_text(None), Polarity::Benefit);
/// ```
#[must_use]
pub fn classify_rules_text(text: Option<&str>) -> Polarity {
    text.and_then(keyword_polarity).unwrap_or_default()
}

/// Polarity named by the text's keywords, if any keyword matches.
fn keyword_polarity(text: &str) -> Option<Polarity> {
    let text = text.to_lowercase();
    if HARM_WORDS.iter().any(|w| text.contains(w)) {
        Some(Polarity::Harm)
    } else if BENEFIT_WORDS.iter().any(|w| text.contains(w)) {
        Some(Polarity::Benefit)
    } else {
        None
    }
}

/// Static card definition from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Creature or spell.
    pub card_type: CardType,

    /// Mana cost.
    #[serde(default)]
    pub cost: u32,

    /// Rules text, if the card has any.
    #[serde(default)]
    pub rules_text: Option<String>,
}

impl CardDefinition {
    /// Create a new card definition.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            card_type,
            cost: 0,
            rules_text: None,
        }
    }

    /// Shorthand for a spell definition.
    #[must_use]
    pub fn spell(id: impl Into<String>, name: impl Into<String>, rules_text: impl Into<String>) -> Self {
        Self::new(id, name, CardType::Spell).with_rules_text(rules_text)
    }

    /// Shorthand for a creature definition.
    #[must_use]
    pub fn creature(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, CardType::Creature)
    }

    /// Set the mana cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Set the rules text (builder pattern).
    #[must_use]
    pub fn with_rules_text(mut self, text: impl Into<String>) -> Self {
        self.rules_text = Some(text.into());
        self
    }

    /// Check if this card is a spell.
    #[must_use]
    pub fn is_spell(&self) -> bool {
        self.card_type == CardType::Spell
    }

    /// Polarity implied by the rules text.
    #[must_use]
    pub fn polarity(&self) -> Polarity {
        classify_rules_text(self.rules_text.as_deref())
    }
}
