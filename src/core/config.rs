//! Choreography timing configuration.
//!
//! Every delay and duration the engine uses lives here. The defaults are
//! tuned values (all in virtual milliseconds); hosts may override any of
//! them, typically by loading a JSON fragment with [`ChoreoConfig::from_json`].
//! Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::{ChoreoError, Result};
use crate::timeline::Millis;

/// Timing policy for the choreography engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreoConfig {
    /// Delay added after each stagger-worthy event.
    pub stagger_step: Millis,

    /// A death within this distance of a visible damage hit on the same
    /// entity gets no synthetic hit.
    pub coincidence_window: Millis,

    /// Attack traversal highlight lifetime (source and target).
    pub attack_duration: Millis,

    /// Hit-flash lifetime.
    pub hit_flash_duration: Millis,

    /// Floating number lifetime.
    pub floating_number_duration: Millis,

    /// Spell-impact pulse lifetime.
    pub spell_impact_duration: Millis,

    /// Time between the hit reaction and the start of the death flourish.
    pub death_hit_hold: Millis,

    /// Death flourish lifetime.
    pub death_flourish_duration: Millis,

    /// Extra time after the flourish before the entity is unpinned.
    pub death_cleanup_grace: Millis,

    /// Non-unique sentinel ids that never receive spell-impact pulses.
    pub placeholder_ids: Vec<String>,

    /// Attack target standing for "the hero across from the attacker".
    pub enemy_hero_alias: String,
}

impl Default for ChoreoConfig {
    fn default() -> Self {
        Self {
            stagger_step: 280,
            coincidence_window: 420,
            attack_duration: 640,
            hit_flash_duration: 1200,
            floating_number_duration: 2400,
            spell_impact_duration: 1560,
            death_hit_hold: 360,
            death_flourish_duration: 560,
            death_cleanup_grace: 90,
            placeholder_ids: vec!["token".into(), "self".into(), "creature".into()],
            enemy_hero_alias: "ENEMY_HERO".into(),
        }
    }
}

impl ChoreoConfig {
    /// Parse a configuration from JSON, filling gaps with defaults.
    ///
    /// The result is validated.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the stagger step.
    #[must_use]
    pub fn with_stagger_step(mut self, step: Millis) -> Self {
        self.stagger_step = step;
        self
    }

    /// Set the synthetic-hit coincidence window.
    #[must_use]
    pub fn with_coincidence_window(mut self, window: Millis) -> Self {
        self.coincidence_window = window;
        self
    }

    /// Set the death hit hold.
    #[must_use]
    pub fn with_death_hit_hold(mut self, hold: Millis) -> Self {
        self.death_hit_hold = hold;
        self
    }

    /// Replace the placeholder id list.
    #[must_use]
    pub fn with_placeholder_ids(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.placeholder_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Total time from a death's scheduled instant until the entity is unpinned.
    #[must_use]
    pub fn death_sequence_length(&self) -> Millis {
        self.death_hit_hold + self.death_flourish_duration + self.death_cleanup_grace
    }

    /// Check the configuration for values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.stagger_step == 0 {
            return Err(ChoreoError::InvalidConfig(
                "stagger_step must be positive".into(),
            ));
        }

        let durations = [
            ("attack_duration", self.attack_duration),
            ("hit_flash_duration", self.hit_flash_duration),
            ("floating_number_duration", self.floating_number_duration),
            ("spell_impact_duration", self.spell_impact_duration),
            ("death_flourish_duration", self.death_flourish_duration),
        ];
        if let Some((name, _)) = durations.iter().find(|(_, d)| *d == 0) {
            return Err(ChoreoError::InvalidConfig(format!("{name} must be positive")));
        }

        if self.enemy_hero_alias.is_empty() {
            return Err(ChoreoError::InvalidConfig(
                "enemy_hero_alias must not be empty".into(),
            ));
        }

        Ok(())
    }
}
