#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Biased boolean sequences.
pub mod bools;
/// Fixture generation configuration types.
pub mod config;
/// Centralized constants used across samplers and generators.
pub mod constants;
/// Reusable example runners shared by demos.
pub mod example_apps;
/// Fake value generators.
pub mod fake;
mod hash;
/// Deferred values evaluated per fixture.
pub mod lazy;
/// Injectable random source.
pub mod rng;
/// Random record selection helpers.
pub mod sampler;
/// Record collection traits, resolver, and in-memory store.
pub mod source;
/// Shared type aliases.
pub mod types;
/// Unique-value wrapper for fake generators.
pub mod unique;

mod errors;

pub use bools::BoolSequence;
pub use config::{BoolSequenceConfig, FixtureConfig};
pub use errors::FixtureError;
pub use fake::{Elements, FakeGenerator, Ipv6Network, Uuid4};
pub use lazy::{Constant, LazyFn, LazyValue, Maybe, lazy_fn};
pub use rng::{FixtureRng, RandomSource};
pub use sampler::{LazyInstance, get_random_instances, random_instance, related_or_random};
pub use source::{
    DeferredTarget, MemoryQuery, MemoryTable, RecordKind, RecordQuery, RecordSource,
};
pub use types::{FilterLabel, GeneratorName, KindName, Locale};
pub use unique::UniqueGenerator;
