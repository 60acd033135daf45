//! Effect tokens.
//!
//! Every scheduled effect instance gets a fresh token. For the same
//! target and kind, a larger token is always the newer effect; a deferred
//! update whose captured token no longer matches the stored one is stale
//! and must not apply.

use serde::{Deserialize, Serialize};

/// Staleness stamp for one effect instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectToken(pub u64);

impl EffectToken {
    /// Get the raw token value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EffectToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

/// Strictly increasing token source.
#[derive(Clone, Debug, Default)]
pub struct TokenMint {
    last: u64,
}

impl TokenMint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next token. Never returns the same token twice.
    pub fn mint(&mut self) -> EffectToken {
        self.last += 1;
        EffectToken(self.last)
    }

    /// The most recently minted token, if any.
    #[must_use]
    pub fn last(&self) -> Option<EffectToken> {
        (self.last > 0).then_some(EffectToken(self.last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_is_strictly_increasing() {
        let mut mint = TokenMint::new();
        assert_eq!(mint.last(), None);

        let a = mint.mint();
        let b = mint.mint();
        let c = mint.mint();
        assert!(a < b && b < c);
        assert_eq!(mint.last(), Some(c));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EffectToken(7)), "Token(7)");
    }
}
