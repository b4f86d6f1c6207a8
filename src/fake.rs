//! Fake value generators driven by the caller's random source.

use std::fmt::Debug;
use std::hash::Hash;
use std::net::Ipv6Addr;

use rand::{Rng, RngCore};
use uuid::Uuid;

use crate::constants::fake::{IPV6_LENGTH, IPV6_NETWORK_NAME, UUID4_NAME};
use crate::errors::FixtureError;
use crate::rng::RandomSource;
use crate::types::GeneratorName;

/// Source of fake values of one shape.
pub trait FakeGenerator {
    /// Values produced; must be comparable so uniqueness can be tracked.
    type Value: Clone + Eq + Hash + Debug;

    /// Name reported in diagnostics.
    fn name(&self) -> &str;

    /// Produce one value for `locale`.
    fn generate(&self, locale: &str, rng: &mut dyn RngCore) -> Result<Self::Value, FixtureError>;
}

/// Random version-4 UUIDs (fixture primary keys).
#[derive(Clone, Copy, Debug, Default)]
pub struct Uuid4;

impl FakeGenerator for Uuid4 {
    type Value = Uuid;

    fn name(&self) -> &str {
        UUID4_NAME
    }

    fn generate(&self, _locale: &str, rng: &mut dyn RngCore) -> Result<Uuid, FixtureError> {
        let mut bytes = [0_u8; 16];
        rng.fill_bytes(&mut bytes);
        Ok(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

/// Random IPv6 networks in CIDR form with a prefix length of at least 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ipv6Network;

impl FakeGenerator for Ipv6Network {
    type Value = String;

    fn name(&self) -> &str {
        IPV6_NETWORK_NAME
    }

    fn generate(&self, _locale: &str, rng: &mut dyn RngCore) -> Result<String, FixtureError> {
        let address: u128 = rng.random();
        let prefix = rng.random_range(1..=IPV6_LENGTH);
        Ok(format!("{}/{}", Ipv6Addr::from(mask_host_bits(address, prefix)), prefix))
    }
}

fn mask_host_bits(address: u128, prefix: u8) -> u128 {
    match prefix {
        0 => 0,
        p if p >= IPV6_LENGTH => address,
        p => address & (u128::MAX << (IPV6_LENGTH - p)),
    }
}

/// Uniform pick from a fixed pool of values.
#[derive(Clone, Debug)]
pub struct Elements<V> {
    name: GeneratorName,
    pool: Vec<V>,
}

impl<V> Elements<V> {
    /// Generator named `name` drawing from `pool`.
    pub fn new<I>(name: impl Into<GeneratorName>, pool: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        Self {
            name: name.into(),
            pool: pool.into_iter().collect(),
        }
    }

    /// Number of values in the pool.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

impl<V: Clone + Eq + Hash + Debug> FakeGenerator for Elements<V> {
    type Value = V;

    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, _locale: &str, rng: &mut dyn RngCore) -> Result<V, FixtureError> {
        rng.choice(&self.pool)
            .cloned()
            .ok_or_else(|| FixtureError::OutOfValues {
                generator: self.name.clone(),
                attempts: 0,
            })
    }
}
