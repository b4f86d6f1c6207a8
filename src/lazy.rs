//! Deferred values declared once and evaluated per constructed fixture.

use rand::RngCore;

use crate::errors::FixtureError;

/// A value computed on demand from the caller's random source.
pub trait LazyValue<T> {
    /// Compute a fresh value.
    fn evaluate(&self, rng: &mut dyn RngCore) -> Result<T, FixtureError>;
}

/// Closure-backed [`LazyValue`].
#[derive(Clone)]
pub struct LazyFn<F> {
    f: F,
}

/// Wrap a closure as a [`LazyValue`].
pub fn lazy_fn<T, F>(f: F) -> LazyFn<F>
where
    F: Fn(&mut dyn RngCore) -> Result<T, FixtureError>,
{
    LazyFn { f }
}

impl<T, F> LazyValue<T> for LazyFn<F>
where
    F: Fn(&mut dyn RngCore) -> Result<T, FixtureError>,
{
    fn evaluate(&self, rng: &mut dyn RngCore) -> Result<T, FixtureError> {
        (self.f)(rng)
    }
}

/// [`LazyValue`] that always yields a clone of the same value.
#[derive(Clone, Debug)]
pub struct Constant<T>(pub T);

impl<T: Clone> LazyValue<T> for Constant<T> {
    fn evaluate(&self, _rng: &mut dyn RngCore) -> Result<T, FixtureError> {
        Ok(self.0.clone())
    }
}

/// Chooses between two deferred values on a decision made elsewhere,
/// typically a draw from a [`BoolSequence`](crate::BoolSequence).
///
/// Only the chosen branch is evaluated.
#[derive(Clone)]
pub struct Maybe<Y, N> {
    yes: Y,
    no: N,
}

impl<Y, N> Maybe<Y, N> {
    /// Pair a "decided true" and a "decided false" branch.
    pub fn new(yes: Y, no: N) -> Self {
        Self { yes, no }
    }

    /// Evaluate the branch selected by `decided`.
    pub fn evaluate_with<T>(
        &self,
        decided: bool,
        rng: &mut dyn RngCore,
    ) -> Result<T, FixtureError>
    where
        Y: LazyValue<T>,
        N: LazyValue<T>,
    {
        if decided {
            self.yes.evaluate(rng)
        } else {
            self.no.evaluate(rng)
        }
    }
}
