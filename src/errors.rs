use thiserror::Error;

/// Error type for fixture sampling, sequence, and uniqueness failures.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("no records in collection for {label}: {query}")]
    EmptyCollection { label: String, query: String },
    #[error("boolean sequence of length {length} is exhausted")]
    ExhaustedSequence { length: usize },
    #[error("generator '{generator}' ran out of unique values after {attempts} attempts")]
    OutOfValues { generator: String, attempts: usize },
    #[error("record store failure: {0}")]
    Store(String),
    #[error("configuration error: {0}")]
    Configuration(String),
}
