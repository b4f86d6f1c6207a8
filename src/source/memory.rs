use std::sync::{Arc, RwLock};

use super::{RecordKind, RecordQuery};
use crate::errors::FixtureError;
use crate::types::{FilterLabel, KindName};

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Named, shared, growable set of records of one kind.
///
/// Clones share the same rows, so a table handed to a deferred source sees
/// rows inserted afterwards.
pub struct MemoryTable<T> {
    kind: KindName,
    rows: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for MemoryTable<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> MemoryTable<T> {
    /// Create an empty table for `kind`.
    pub fn new(kind: impl Into<KindName>) -> Self {
        Self {
            kind: kind.into(),
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Append one record.
    pub fn insert(&self, row: T) {
        self.rows
            .write()
            .expect("memory table lock poisoned")
            .push(row);
    }

    /// Append records in order.
    pub fn extend<I>(&self, rows: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.rows
            .write()
            .expect("memory table lock poisoned")
            .extend(rows);
    }

    /// Remove every record.
    pub fn clear(&self) {
        self.rows.write().expect("memory table lock poisoned").clear();
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.rows.read().expect("memory table lock poisoned").len()
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unfiltered live query over this table.
    pub fn all_rows(&self) -> MemoryQuery<T> {
        MemoryQuery {
            kind: self.kind.clone(),
            rows: Arc::clone(&self.rows),
            filters: Vec::new(),
        }
    }

    /// Live query over the rows matching `predicate`.
    pub fn filter<F>(&self, label: impl Into<FilterLabel>, predicate: F) -> MemoryQuery<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.all_rows().filter(label, predicate)
    }
}

impl<T: Clone + Send + Sync + 'static> RecordKind<T> for MemoryTable<T> {
    fn kind_name(&self) -> &str {
        &self.kind
    }

    fn all(&self) -> Arc<dyn RecordQuery<T>> {
        Arc::new(self.all_rows())
    }
}

/// Filtered view over a [`MemoryTable`], evaluated on every call.
pub struct MemoryQuery<T> {
    kind: KindName,
    rows: Arc<RwLock<Vec<T>>>,
    filters: Vec<(FilterLabel, Predicate<T>)>,
}

impl<T> Clone for MemoryQuery<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            rows: Arc::clone(&self.rows),
            filters: self.filters.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> MemoryQuery<T> {
    /// Narrow this query with another predicate (all predicates must match).
    pub fn filter<F>(&self, label: impl Into<FilterLabel>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.filters.push((label.into(), Arc::new(predicate)));
        next
    }

    fn matches(&self, row: &T) -> bool {
        self.filters.iter().all(|(_, predicate)| predicate(row))
    }
}

impl<T: Clone + Send + Sync + 'static> RecordQuery<T> for MemoryQuery<T> {
    fn count(&self) -> Result<usize, FixtureError> {
        let rows = self.rows.read().expect("memory table lock poisoned");
        Ok(rows.iter().filter(|row| self.matches(row)).count())
    }

    fn fetch(&self) -> Result<Vec<T>, FixtureError> {
        let rows = self.rows.read().expect("memory table lock poisoned");
        Ok(rows
            .iter()
            .filter(|row| self.matches(row))
            .cloned()
            .collect())
    }

    fn nth(&self, idx: usize) -> Result<Option<T>, FixtureError> {
        let rows = self.rows.read().expect("memory table lock poisoned");
        Ok(rows
            .iter()
            .filter(|row| self.matches(row))
            .nth(idx)
            .cloned())
    }

    fn explain(&self) -> String {
        let matched = self.count().unwrap_or(0);
        if self.filters.is_empty() {
            return format!("scan {} ({} rows)", self.kind, matched);
        }
        let labels = self
            .filters
            .iter()
            .map(|(label, _)| label.as_str())
            .collect::<Vec<_>>()
            .join(" and ");
        format!("scan {} where {} ({} rows)", self.kind, labels, matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Site {
        name: &'static str,
        active: bool,
    }

    fn sites() -> MemoryTable<Site> {
        let table = MemoryTable::new("site");
        table.extend([
            Site {
                name: "ams",
                active: true,
            },
            Site {
                name: "fra",
                active: false,
            },
            Site {
                name: "lhr",
                active: true,
            },
        ]);
        table
    }

    #[test]
    fn filter_counts_fetches_and_indexes_consistently() {
        let table = sites();
        let active = table.filter("active", |site| site.active);
        assert_eq!(active.count().unwrap(), 2);
        let names: Vec<_> = active.fetch().unwrap().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["ams", "lhr"]);
        assert_eq!(active.nth(1).unwrap().map(|s| s.name), Some("lhr"));
        assert!(active.nth(2).unwrap().is_none());
    }

    #[test]
    fn queries_are_live_over_later_inserts() {
        let table = sites();
        let active = table.filter("active", |site| site.active);
        table.insert(Site {
            name: "sin",
            active: true,
        });
        assert_eq!(active.count().unwrap(), 3);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn chained_filters_must_all_match() {
        let table = sites();
        let query = table
            .filter("active", |site| site.active)
            .filter("name starts with l", |site| site.name.starts_with('l'));
        assert_eq!(query.count().unwrap(), 1);
        assert_eq!(
            query.explain(),
            "scan site where active and name starts with l (1 rows)"
        );
    }

    #[test]
    fn empty_table_reports_no_rows() {
        let table: MemoryTable<Site> = MemoryTable::new("site");
        assert!(table.is_empty());
        assert!(!table.all_rows().exists().unwrap());
        assert_eq!(table.all().explain(), "scan site (0 rows)");

        let populated = sites();
        let all = populated.all_rows();
        populated.clear();
        assert_eq!(all.count().unwrap(), 0);
    }
}
