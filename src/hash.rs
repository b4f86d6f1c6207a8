use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hash `label` together with `seed` so the result only depends on both inputs.
pub fn stable_hash_str(seed: u64, label: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    label.hash(&mut hasher);
    hasher.finish()
}
