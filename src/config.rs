use serde::{Deserialize, Serialize};

use crate::constants::bools::{DEFAULT_CHANCE_OF_TRUE, DEFAULT_LENGTH, MAX_CHANCE_OF_TRUE};
use crate::constants::config::DEFAULT_SEED;
use crate::constants::unique::{DEFAULT_LOCALE, DEFAULT_MAX_RETRIES};
use crate::errors::FixtureError;
use crate::rng::FixtureRng;
use crate::types::Locale;

/// Controls how a [`BoolSequence`](crate::BoolSequence) is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoolSequenceConfig {
    /// Restart from the beginning once all values are drawn.
    pub cycle: bool,
    /// Percentage (0-100) of values set to `true`.
    pub chance_of_getting_true: u8,
    /// Number of values in one cycle.
    pub length: usize,
}

impl Default for BoolSequenceConfig {
    fn default() -> Self {
        Self {
            cycle: true,
            chance_of_getting_true: DEFAULT_CHANCE_OF_TRUE,
            length: DEFAULT_LENGTH,
        }
    }
}

impl BoolSequenceConfig {
    /// Non-cycling variant of the defaults.
    pub fn finite(length: usize) -> Self {
        Self {
            cycle: false,
            length,
            ..Self::default()
        }
    }

    /// Number of `true` values per cycle: `floor(length * chance / 100)`.
    ///
    /// Never exceeds `length` for a valid chance, so any `length` is safe.
    pub fn true_count(&self) -> usize {
        let chance = u128::from(self.chance_of_getting_true.min(MAX_CHANCE_OF_TRUE));
        (self.length as u128 * chance / 100) as usize
    }

    /// Reject percentages outside 0-100.
    pub fn validate(&self) -> Result<(), FixtureError> {
        if self.chance_of_getting_true > MAX_CHANCE_OF_TRUE {
            return Err(FixtureError::Configuration(format!(
                "chance_of_getting_true must be within 0-{}, got {}",
                MAX_CHANCE_OF_TRUE, self.chance_of_getting_true
            )));
        }
        Ok(())
    }
}

/// Top-level fixture generation configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// RNG seed that controls every random pick in a run.
    pub seed: u64,
    /// Locale used by unique-value wrappers when callers do not name one.
    pub locale: Locale,
    /// Attempts a unique-value wrapper makes before giving up.
    pub unique_max_retries: usize,
    /// Defaults for boolean sequences.
    pub bool_sequence: BoolSequenceConfig,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            locale: DEFAULT_LOCALE.to_string(),
            unique_max_retries: DEFAULT_MAX_RETRIES,
            bool_sequence: BoolSequenceConfig::default(),
        }
    }
}

impl FixtureConfig {
    /// Fresh random source seeded from `seed`.
    pub fn rng(&self) -> FixtureRng {
        FixtureRng::new(self.seed)
    }

    /// Check every nested setting.
    pub fn validate(&self) -> Result<(), FixtureError> {
        if self.unique_max_retries == 0 {
            return Err(FixtureError::Configuration(
                "unique_max_retries must be greater than zero".into(),
            ));
        }
        if self.locale.is_empty() {
            return Err(FixtureError::Configuration(
                "locale must not be empty".into(),
            ));
        }
        self.bool_sequence.validate()
    }
}
