/// Constants used by the biased boolean sequence.
pub mod bools {
    /// Default number of values in one shuffled cycle.
    pub const DEFAULT_LENGTH: usize = 8;
    /// Default percentage (0-100) of `true` values per cycle.
    pub const DEFAULT_CHANCE_OF_TRUE: u8 = 50;
    /// Upper bound accepted for `chance_of_getting_true`.
    pub const MAX_CHANCE_OF_TRUE: u8 = 100;
}

/// Constants used by the unique-value wrapper.
pub mod unique {
    /// Attempts made against the inner generator before reporting exhaustion.
    pub const DEFAULT_MAX_RETRIES: usize = 1000;
    /// Locale used when callers do not name one.
    pub const DEFAULT_LOCALE: &str = "en_US";
}

/// Constants used by the multi-instance sampler.
pub mod sampler {
    /// Upper bound (inclusive) of the cardinality branch draw: 0 = none, 1 = one, 2 = several.
    pub const BRANCH_SEVERAL: usize = 2;
    /// Smallest size drawn on the "several" branch.
    pub const MIN_SEVERAL: usize = 2;
}

/// Constants used by fake value generators.
pub mod fake {
    /// Bit length of an IPv6 address.
    pub const IPV6_LENGTH: u8 = 128;
    /// Generator name reported by the UUID v4 generator.
    pub const UUID4_NAME: &str = "uuid4";
    /// Generator name reported by the IPv6 network generator.
    pub const IPV6_NETWORK_NAME: &str = "ipv6_network";
}

/// Constants used by configuration defaults.
pub mod config {
    /// Default seed for the fixture random source.
    pub const DEFAULT_SEED: u64 = 42;
}
