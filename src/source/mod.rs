//! Record collection interfaces and the collection resolver.
//!
//! Ownership model:
//! - `RecordQuery` is a countable, enumerable, indexable view over records of one kind.
//! - `RecordKind` is a descriptor that can produce the "all records" query for its kind.
//! - `RecordSource` is what sampling helpers accept: a kind, a query, or a deferred
//!   producer of either. Resolution happens at sampling time, never at definition time.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::errors::FixtureError;
use crate::types::FilterLabel;

/// In-memory record store used by tests and demos.
pub mod memory;

pub use memory::{MemoryQuery, MemoryTable};

/// Queryable view over a set of records of a single kind.
///
/// Implementations must keep `count`, `fetch`, and `nth` consistent with each
/// other for a fixed store state.
pub trait RecordQuery<T>: Send + Sync {
    /// Number of records currently matched.
    fn count(&self) -> Result<usize, FixtureError>;

    /// Whether at least one record is matched.
    fn exists(&self) -> Result<bool, FixtureError> {
        Ok(self.count()? > 0)
    }

    /// All matched records in store order.
    fn fetch(&self) -> Result<Vec<T>, FixtureError>;

    /// The record at position `idx` of `fetch` order, if any.
    fn nth(&self, idx: usize) -> Result<Option<T>, FixtureError> {
        Ok(self.fetch()?.into_iter().nth(idx))
    }

    /// Diagnostic description of the query, used in error messages.
    fn explain(&self) -> String;
}

/// Descriptor for a category of records ("all records of kind X").
pub trait RecordKind<T>: Send + Sync {
    /// Stable kind name.
    fn kind_name(&self) -> &str;
    /// Query over every record of this kind.
    fn all(&self) -> Arc<dyn RecordQuery<T>>;
}

/// What a deferred producer may hand back: a kind descriptor or a query.
pub enum DeferredTarget<T> {
    /// Resolve to all records of this kind.
    Kind(Arc<dyn RecordKind<T>>),
    /// Use this query as-is.
    Query(Arc<dyn RecordQuery<T>>),
}

type DeferredProducer<T> = Arc<dyn Fn() -> DeferredTarget<T> + Send + Sync>;

/// Input accepted by the sampling helpers.
pub enum RecordSource<T> {
    /// All records of a kind.
    Kind(Arc<dyn RecordKind<T>>),
    /// An already-built (possibly filtered) query.
    Query(Arc<dyn RecordQuery<T>>),
    /// A producer invoked on every resolution; its result is never cached.
    Deferred {
        /// Label used in diagnostics, since the producer itself is opaque.
        label: FilterLabel,
        /// Zero-argument producer of a kind or query.
        producer: DeferredProducer<T>,
    },
}

impl<T> Clone for RecordSource<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Kind(kind) => Self::Kind(Arc::clone(kind)),
            Self::Query(query) => Self::Query(Arc::clone(query)),
            Self::Deferred { label, producer } => Self::Deferred {
                label: label.clone(),
                producer: Arc::clone(producer),
            },
        }
    }
}

impl<T> fmt::Debug for RecordSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl<T: 'static> RecordSource<T> {
    /// Source over every record of `kind`.
    pub fn kind(kind: impl RecordKind<T> + 'static) -> Self {
        Self::Kind(Arc::new(kind))
    }

    /// Source over an already-built query.
    pub fn query(query: impl RecordQuery<T> + 'static) -> Self {
        Self::Query(Arc::new(query))
    }

    /// Source whose kind or query is produced lazily on every sampling call.
    pub fn deferred<F>(label: impl Into<FilterLabel>, producer: F) -> Self
    where
        F: Fn() -> DeferredTarget<T> + Send + Sync + 'static,
    {
        Self::Deferred {
            label: label.into(),
            producer: Arc::new(producer),
        }
    }
}

impl<T> RecordSource<T> {
    /// Resolve to a concrete query. Never fails; store errors surface on use.
    pub fn resolve(&self) -> Arc<dyn RecordQuery<T>> {
        match self {
            Self::Kind(kind) => {
                debug!(kind = kind.kind_name(), "resolving all records of kind");
                kind.all()
            }
            Self::Query(query) => Arc::clone(query),
            Self::Deferred { label, producer } => match producer() {
                DeferredTarget::Kind(kind) => {
                    debug!(
                        source = label.as_str(),
                        kind = kind.kind_name(),
                        "deferred source produced a kind"
                    );
                    kind.all()
                }
                DeferredTarget::Query(query) => {
                    debug!(source = label.as_str(), "deferred source produced a query");
                    query
                }
            },
        }
    }

    /// Human-readable description of the input (not the resolved query).
    pub fn label(&self) -> String {
        match self {
            Self::Kind(kind) => format!("kind '{}'", kind.kind_name()),
            Self::Query(query) => query.explain(),
            Self::Deferred { label, .. } => format!("deferred '{label}'"),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> From<MemoryTable<T>> for RecordSource<T> {
    fn from(table: MemoryTable<T>) -> Self {
        Self::kind(table)
    }
}

impl<T: Clone + Send + Sync + 'static> From<MemoryQuery<T>> for RecordSource<T> {
    fn from(query: MemoryQuery<T>) -> Self {
        Self::query(query)
    }
}

impl<T: Clone + Send + Sync + 'static> From<MemoryTable<T>> for DeferredTarget<T> {
    fn from(table: MemoryTable<T>) -> Self {
        Self::Kind(Arc::new(table))
    }
}

impl<T: Clone + Send + Sync + 'static> From<MemoryQuery<T>> for DeferredTarget<T> {
    fn from(query: MemoryQuery<T>) -> Self {
        Self::Query(Arc::new(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn numbers() -> MemoryTable<u32> {
        let table = MemoryTable::new("number");
        table.extend([1, 2, 3, 4]);
        table
    }

    #[test]
    fn kind_resolves_to_all_records() {
        let source = RecordSource::from(numbers());
        assert_eq!(source.resolve().fetch().unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(source.label(), "kind 'number'");
    }

    #[test]
    fn query_is_returned_as_is() {
        let table = numbers();
        let source = RecordSource::from(table.filter("even", |n| n % 2 == 0));
        assert_eq!(source.resolve().fetch().unwrap(), vec![2, 4]);
        assert!(source.label().contains("even"));
    }

    #[test]
    fn deferred_kind_and_query_both_resolve() {
        let table = numbers();
        let as_kind = {
            let table = table.clone();
            RecordSource::<u32>::deferred("numbers", move || table.clone().into())
        };
        assert_eq!(as_kind.resolve().count().unwrap(), 4);

        let as_query = {
            let table = table.clone();
            RecordSource::<u32>::deferred("odd numbers", move || {
                table.filter("odd", |n| n % 2 == 1).into()
            })
        };
        assert_eq!(as_query.resolve().fetch().unwrap(), vec![1, 3]);
        assert_eq!(as_query.label(), "deferred 'odd numbers'");
    }

    #[test]
    fn deferred_producer_runs_on_every_resolution() {
        let table = numbers();
        let calls = Arc::new(AtomicUsize::new(0));
        let source = {
            let calls = Arc::clone(&calls);
            let table = table.clone();
            RecordSource::<u32>::deferred("counted", move || {
                calls.fetch_add(1, Ordering::SeqCst);
                table.clone().into()
            })
        };
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        source.resolve();
        source.clone().resolve();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
