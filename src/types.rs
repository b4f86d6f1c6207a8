/// Name of a record kind (the table or model a descriptor stands for).
/// Examples: `location`, `tag`, `status`
pub type KindName = String;
/// Locale key used to partition uniqueness memory.
/// Examples: `en_US`, `de_DE`
pub type Locale = String;
/// Human-readable label attached to filters and deferred sources.
/// Examples: `group is set`, `statuses for device`
pub type FilterLabel = String;
/// Name reported by a fake value generator.
/// Examples: `uuid4`, `ipv6_network`
pub type GeneratorName = String;
