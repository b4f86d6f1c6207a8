use std::collections::HashSet;

use indexmap::IndexMap;
use rand::RngCore;
use tracing::{debug, warn};

use crate::config::FixtureConfig;
use crate::constants::unique::{DEFAULT_LOCALE, DEFAULT_MAX_RETRIES};
use crate::errors::FixtureError;
use crate::fake::FakeGenerator;
use crate::types::Locale;

/// Wraps a [`FakeGenerator`] so it never repeats a value within a locale.
///
/// Memory is kept per locale and lives until [`clear`](Self::clear) or
/// [`clear_all`](Self::clear_all). Nothing is cleared automatically, including
/// after [`FixtureError::OutOfValues`].
pub struct UniqueGenerator<G: FakeGenerator> {
    inner: G,
    default_locale: Locale,
    max_retries: usize,
    seen: IndexMap<Locale, HashSet<G::Value>>,
}

impl<G: FakeGenerator> UniqueGenerator<G> {
    /// Wrap `inner` with the default locale and retry limit.
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            default_locale: DEFAULT_LOCALE.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            seen: IndexMap::new(),
        }
    }

    /// Wrap `inner` using the locale and retry limit from `config`.
    pub fn from_config(inner: G, config: &FixtureConfig) -> Self {
        Self::new(inner)
            .with_locale(config.locale.clone())
            .with_max_retries(config.unique_max_retries)
    }

    /// Override the locale used by [`generate`](Self::generate).
    pub fn with_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Override how many draws are attempted before giving up (at least one).
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Wrapped generator.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Draw an unseen value for the default locale.
    pub fn generate(&mut self, rng: &mut dyn RngCore) -> Result<G::Value, FixtureError> {
        let locale = self.default_locale.clone();
        self.generate_for(&locale, rng)
    }

    /// Draw an unseen value for `locale`.
    ///
    /// Errors from the wrapped generator are returned unchanged.
    pub fn generate_for(
        &mut self,
        locale: &str,
        rng: &mut dyn RngCore,
    ) -> Result<G::Value, FixtureError> {
        let seen = self.seen.entry(locale.to_string()).or_default();
        for _ in 0..self.max_retries {
            let value = self.inner.generate(locale, rng)?;
            if seen.insert(value.clone()) {
                return Ok(value);
            }
        }
        warn!(
            generator = self.inner.name(),
            locale,
            attempts = self.max_retries,
            remembered = seen.len(),
            "unique generator ran out of values"
        );
        Err(FixtureError::OutOfValues {
            generator: self.inner.name().to_string(),
            attempts: self.max_retries,
        })
    }

    /// Forget every value returned for `locale`.
    pub fn clear(&mut self, locale: &str) {
        if let Some(seen) = self.seen.get_mut(locale) {
            debug!(
                generator = self.inner.name(),
                locale,
                forgotten = seen.len(),
                "clearing unique values"
            );
            seen.clear();
        }
    }

    /// Forget every value for every locale.
    pub fn clear_all(&mut self) {
        self.seen.clear();
    }

    /// Number of values remembered for `locale`.
    pub fn seen(&self, locale: &str) -> usize {
        self.seen.get(locale).map_or(0, HashSet::len)
    }
}
