//! Pre-shuffled boolean sequences with a fixed `true` ratio.
//!
//! Flipping a coin per draw can leave a short run without one of the two
//! outcomes. A sequence instead builds a bag with exactly
//! `floor(length * chance / 100)` trues, shuffles it once, and hands values out
//! in that order.

use rand::Rng;
use tracing::debug;

use crate::config::BoolSequenceConfig;
use crate::errors::FixtureError;
use crate::rng::RandomSource;

/// Shuffled, fixed-ratio sequence of booleans.
#[derive(Clone, Debug)]
pub struct BoolSequence {
    values: Vec<bool>,
    position: usize,
    cycle: bool,
}

impl BoolSequence {
    /// Build and shuffle a sequence from `config`.
    pub fn new<R: Rng + ?Sized>(
        config: &BoolSequenceConfig,
        rng: &mut R,
    ) -> Result<Self, FixtureError> {
        config.validate()?;
        let trues = config.true_count();
        let mut values = vec![true; trues];
        values.resize(config.length, false);
        rng.shuffle(&mut values);
        debug!(
            length = config.length,
            trues,
            cycle = config.cycle,
            "built boolean sequence"
        );
        Ok(Self {
            values,
            position: 0,
            cycle: config.cycle,
        })
    }

    /// Cycling sequence with the default length and ratio.
    pub fn cycling<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, FixtureError> {
        Self::new(&BoolSequenceConfig::default(), rng)
    }

    /// Draw the next value.
    ///
    /// A cycling sequence wraps to the start; a non-cycling one fails once
    /// every value has been drawn. An empty sequence fails in both modes.
    pub fn next_value(&mut self) -> Result<bool, FixtureError> {
        if self.position >= self.values.len() {
            if !self.cycle || self.values.is_empty() {
                return Err(FixtureError::ExhaustedSequence {
                    length: self.values.len(),
                });
            }
            self.position = 0;
        }
        let value = self.values[self.position];
        self.position += 1;
        Ok(value)
    }

    /// Rewind to the first value, replaying the same order.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Values of one cycle in draw order.
    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// Number of values in one cycle.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence has no values at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the sequence wraps around.
    pub fn is_cycling(&self) -> bool {
        self.cycle
    }
}

impl Iterator for BoolSequence {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.next_value().ok()
    }
}
