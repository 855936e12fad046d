//! Dataset store
//!
//! Loads the credit-risk CSV once at startup into an immutable in-memory
//! table. Everything downstream borrows from it; no write path exists after
//! construction.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::models::{CategoricalField, NumericField, Record};

/// Incomes above this are treated as outliers when seeding the income
/// slider, matching the dashboard's "meaningful income range".
pub const INCOME_SLIDER_CAP: f64 = 300_000.0;

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to open dataset {path}: {source}")]
    Open {
        path: String,
        source: csv::Error,
    },
    #[error("malformed dataset row: {0}")]
    Malformed(#[from] csv::Error),
    #[error("dataset {0} contains no rows")]
    Empty(String),
}

/// Min/max of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
}

/// The full dataset, loaded once and never mutated. Filtering produces
/// borrowed views; it never alters the backing rows.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Load the dataset from a CSV file. Fails if the file is missing,
    /// a row is malformed, a required column is absent, or no rows exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| DataLoadError::Open {
            path: path.display().to_string(),
            source: e,
        })?;

        let records = reader
            .deserialize::<Record>()
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_records(records, &path.display().to_string())
    }

    /// Build a dataset from already-parsed rows. Rejects empty input so
    /// summaries are always defined.
    pub fn from_records(records: Vec<Record>, origin: &str) -> Result<Self, DataLoadError> {
        if records.is_empty() {
            return Err(DataLoadError::Empty(origin.to_string()));
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Min and max of a numeric column.
    pub fn summary(&self, field: NumericField) -> NumericSummary {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for record in &self.records {
            let v = record.numeric(field);
            min = min.min(v);
            max = max.max(v);
        }
        NumericSummary { min, max }
    }

    /// Distinct values of a categorical column, in first-seen order. The
    /// order is reproduced exactly so default UI selections stay stable.
    pub fn distinct_values(&self, field: CategoricalField) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for record in &self.records {
            let v = record.categorical(field);
            if !seen.contains(&v) {
                seen.push(v);
            }
        }
        seen
    }

    /// Income bounds used to seed the income range slider, ignoring incomes
    /// above [`INCOME_SLIDER_CAP`]. Falls back to the full range when every
    /// income is above the cap.
    pub fn income_slider_bounds(&self) -> NumericSummary {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for record in &self.records {
            if record.income <= INCOME_SLIDER_CAP {
                min = min.min(record.income);
                max = max.max(record.income);
            }
        }
        if min.is_infinite() {
            return self.summary(NumericField::Income);
        }
        NumericSummary { min, max }
    }
}
