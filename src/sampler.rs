use rand::{Rng, RngCore};
use tracing::debug;

use crate::constants::sampler::{BRANCH_SEVERAL, MIN_SEVERAL};
use crate::errors::FixtureError;
use crate::lazy::LazyValue;
use crate::rng::RandomSource;
use crate::source::{RecordQuery, RecordSource};

/// Deferred single-record pick built by [`random_instance`].
///
/// Holds the source unevaluated; every [`evaluate`](Self::evaluate) resolves it
/// again and draws a fresh record.
pub struct LazyInstance<T> {
    source: RecordSource<T>,
    allow_null: bool,
}

impl<T> Clone for LazyInstance<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            allow_null: self.allow_null,
        }
    }
}

impl<T> LazyInstance<T> {
    /// Source this pick draws from.
    pub fn source(&self) -> &RecordSource<T> {
        &self.source
    }

    /// Whether an empty collection yields `None` instead of an error.
    pub fn allows_null(&self) -> bool {
        self.allow_null
    }

    /// Resolve the source and pick one record uniformly at random.
    pub fn evaluate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Option<T>, FixtureError> {
        let query = self.source.resolve();
        if !query.exists()? {
            if self.allow_null {
                return Ok(None);
            }
            return Err(FixtureError::EmptyCollection {
                label: self.source.label(),
                query: query.explain(),
            });
        }
        let count = query.count()?;
        pick_one(query.as_ref(), count, rng).map(Some)
    }
}

impl<T> LazyValue<Option<T>> for LazyInstance<T> {
    fn evaluate(&self, rng: &mut dyn RngCore) -> Result<Option<T>, FixtureError> {
        LazyInstance::evaluate(self, rng)
    }
}

/// Build a deferred pick of one random record from `source`.
///
/// Nothing is resolved here: the collection may not exist yet when a fixture
/// field is declared. With `allow_null = false`, evaluating against an empty
/// collection fails with [`FixtureError::EmptyCollection`].
pub fn random_instance<T>(
    source: impl Into<RecordSource<T>>,
    allow_null: bool,
) -> LazyInstance<T> {
    LazyInstance {
        source: source.into(),
        allow_null,
    }
}

/// Eagerly pick a random number of distinct records from `source`.
///
/// The cardinality is deliberately not uniform: roughly a third of calls
/// return nothing, a third return one record, and a third return between
/// `max(2, minimum)` and `min(maximum, count)` records. `maximum = None` means
/// the collection size. `minimum` overrides the "none" and "one" outcomes when
/// it is large enough.
pub fn get_random_instances<T, R>(
    source: &RecordSource<T>,
    minimum: usize,
    maximum: Option<usize>,
    rng: &mut R,
) -> Result<Vec<T>, FixtureError>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let branch = rng.randint(0, BRANCH_SEVERAL);
    let query = source.resolve();
    let count = query.count()?;
    let maximum = maximum.unwrap_or(count);

    if (branch == 0 && minimum == 0) || count == 0 || maximum == 0 {
        return Ok(Vec::new());
    }
    if (branch == 1 && minimum <= 1) || count == 1 || maximum == 1 {
        return Ok(vec![pick_one(query.as_ref(), count, rng)?]);
    }

    let upper = maximum.min(count);
    let mut lower = minimum.max(MIN_SEVERAL);
    if lower > upper {
        debug!(
            source = %source.label(),
            minimum,
            upper,
            "clamping sample minimum to available upper bound"
        );
        lower = upper;
    }
    let k = rng.randint(lower, upper);
    let population = query.fetch()?;
    Ok(rng
        .sample_indices(population.len(), k)
        .into_iter()
        .map(|idx| population[idx].clone())
        .collect())
}

/// Post-generation helper: keep an explicit non-empty list, otherwise sample.
///
/// Falls back to `get_random_instances(source, 0, None, rng)`.
pub fn related_or_random<T, R>(
    extracted: Option<Vec<T>>,
    source: &RecordSource<T>,
    rng: &mut R,
) -> Result<Vec<T>, FixtureError>
where
    T: Clone,
    R: Rng + ?Sized,
{
    match extracted {
        Some(records) if !records.is_empty() => Ok(records),
        _ => get_random_instances(source, 0, None, rng),
    }
}

fn pick_one<T, R>(
    query: &dyn RecordQuery<T>,
    count: usize,
    rng: &mut R,
) -> Result<T, FixtureError>
where
    R: Rng + ?Sized,
{
    let idx = rng.random_range(0..count);
    query.nth(idx)?.ok_or_else(|| {
        FixtureError::Store(format!(
            "index {} out of range for {} (count was {})",
            idx,
            query.explain(),
            count
        ))
    })
}
