//! Filter criteria value objects

use serde::{Deserialize, Serialize};

use super::record::{CategoricalField, NumericField};

/// Equality predicate on a categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalPredicate {
    pub field: CategoricalField,
    pub value: String,
}

/// Inclusive range predicate on a numeric column. min > max is a legal
/// criteria that simply matches nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangePredicate {
    pub field: NumericField,
    pub min: f64,
    pub max: f64,
}

/// The full set of active filter predicates, combined with logical AND.
/// An empty set selects the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub categorical: Vec<CategoricalPredicate>,
    #[serde(default)]
    pub ranges: Vec<RangePredicate>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals(mut self, field: CategoricalField, value: impl Into<String>) -> Self {
        self.categorical.push(CategoricalPredicate {
            field,
            value: value.into(),
        });
        self
    }

    pub fn range(mut self, field: NumericField, min: f64, max: f64) -> Self {
        self.ranges.push(RangePredicate { field, min, max });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.categorical.is_empty() && self.ranges.is_empty()
    }
}
