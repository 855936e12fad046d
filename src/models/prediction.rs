//! Prediction value objects

use serde::{Deserialize, Serialize};

/// The exact ordered inputs the classifier was trained on. Field order and
/// count are a positional contract at the model boundary; do not reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub grade_code: i64,
    pub interest_rate: f64,
    pub income: f64,
}

impl FeatureVector {
    /// Positional form consumed by the classifier.
    pub fn as_array(&self) -> [f64; 3] {
        [self.grade_code as f64, self.interest_rate, self.income]
    }
}

/// Outcome of a single point prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub default_risk: bool,
    pub message: String,
}

/// One feature's permutation-importance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}
