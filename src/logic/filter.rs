//! Filter engine
//!
//! Pure, stateless filtering of the dataset. A row is included iff it
//! satisfies every predicate; source order is preserved. Single pass,
//! O(rows x predicates); no indexes at this scale, though nothing here
//! prevents pre-bucketing by a categorical column later.

use crate::logic::dataset::Dataset;
use crate::models::{FilterCriteria, Record};

/// A read-only, ordered subset of the dataset. Recomputed fresh on every
/// criteria change, never cached.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    /// A view over no rows at all (used by charts that carry their own
    /// pre-aggregated data).
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().copied()
    }
}

/// Apply every predicate in `criteria` (logical AND). Empty criteria
/// returns the full dataset; an inverted range matches nothing.
pub fn apply<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    let rows = dataset
        .records()
        .iter()
        .filter(|record| matches(record, criteria))
        .collect();
    FilteredView { rows }
}

fn matches(record: &Record, criteria: &FilterCriteria) -> bool {
    let categorical_ok = criteria
        .categorical
        .iter()
        .all(|p| record.categorical(p.field) == p.value);
    let ranges_ok = criteria.ranges.iter().all(|p| {
        let v = record.numeric(p.field);
        v >= p.min && v <= p.max
    });
    categorical_ok && ranges_ok
}
