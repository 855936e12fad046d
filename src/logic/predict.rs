//! Prediction service
//!
//! Wraps the pre-trained default classifier. The service validates inputs
//! before the model ever sees them (the model performs no validation of its
//! own), maps the binary outcome to a fixed message, and computes permutation
//! feature importance over the dataset.

use std::path::Path;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::codec::{CategoryCodec, CodecError};
use crate::logic::dataset::Dataset;
use crate::models::{FeatureImportance, FeatureVector, PredictionResult};

/// Fixed outcome messages.
pub const DEFAULT_RISK_MESSAGE: &str = "Prediction: Loan Default Risk 🚨";
pub const LOW_RISK_MESSAGE: &str = "Prediction: Low Default Risk ✅";

/// Display names of the model inputs, in feature order.
pub const FEATURE_NAMES: [&str; 3] = ["Loan Grade", "Loan Interest Rate", "Person's Income"];

/// User-input validation failure. Recoverable; rendered inline, never a crash.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid feature: {0}")]
pub struct InvalidFeatureError(pub String);

/// Any binary classifier over the fixed feature tuple. Implementations do no
/// input validation; callers go through [`PredictionService::predict`].
pub trait Classifier: Send + Sync {
    /// 0 = no default, 1 = default.
    fn classify(&self, features: &FeatureVector) -> u8;
}

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("failed to open model {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

/// One node of the serialized decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: u8,
    },
}

/// The pre-trained decision tree, loaded once at startup from a JSON
/// artifact and treated as opaque afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeModel {
    nodes: Vec<TreeNode>,
}

impl DecisionTreeModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ModelLoadError::Open {
            path: path.display().to_string(),
            source: e,
        })?;
        let model: Self = serde_json::from_str(&raw)?;
        model.validate()?;
        Ok(model)
    }

    pub fn from_nodes(nodes: Vec<TreeNode>) -> Result<Self, ModelLoadError> {
        let model = Self { nodes };
        model.validate()?;
        Ok(model)
    }

    /// Child indices must stay in range and point strictly forward, which
    /// rules out cycles and guarantees traversal terminates.
    fn validate(&self) -> Result<(), ModelLoadError> {
        if self.nodes.is_empty() {
            return Err(ModelLoadError::Invalid("tree has no nodes".to_string()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= FEATURE_NAMES.len() {
                    return Err(ModelLoadError::Invalid(format!(
                        "node {i} references feature {feature}"
                    )));
                }
                for child in [left, right] {
                    if *child >= self.nodes.len() || *child <= i {
                        return Err(ModelLoadError::Invalid(format!(
                            "node {i} has out-of-order child {child}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Classifier for DecisionTreeModel {
    fn classify(&self, features: &FeatureVector) -> u8 {
        let x = features.as_array();
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { class } => return *class,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

/// Request/response prediction over an injected classifier. No session state.
pub struct PredictionService {
    codec: CategoryCodec,
    classifier: Arc<dyn Classifier>,
}

impl PredictionService {
    pub fn new(codec: CategoryCodec, classifier: Arc<dyn Classifier>) -> Self {
        Self { codec, classifier }
    }

    pub fn codec(&self) -> &CategoryCodec {
        &self.codec
    }

    pub fn classifier(&self) -> Arc<dyn Classifier> {
        self.classifier.clone()
    }

    /// Validate the feature vector, then classify. Validation happens before
    /// the classifier is invoked.
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, InvalidFeatureError> {
        self.validate(features)?;
        let outcome = self.classifier.classify(features);
        let default_risk = outcome == 1;
        let message = if default_risk {
            DEFAULT_RISK_MESSAGE
        } else {
            LOW_RISK_MESSAGE
        };
        Ok(PredictionResult {
            default_risk,
            message: message.to_string(),
        })
    }

    fn validate(&self, features: &FeatureVector) -> Result<(), InvalidFeatureError> {
        if !self.codec.contains_code(features.grade_code) {
            return Err(InvalidFeatureError(format!(
                "loan grade code {} is out of range (0..{})",
                features.grade_code,
                self.codec.len()
            )));
        }
        if !features.interest_rate.is_finite() || features.interest_rate < 0.0 {
            return Err(InvalidFeatureError(
                "loan interest rate must be a finite, non-negative number".to_string(),
            ));
        }
        if !features.income.is_finite() || features.income < 0.0 {
            return Err(InvalidFeatureError(
                "income must be a finite, non-negative number".to_string(),
            ));
        }
        Ok(())
    }

    /// Permutation importance of the model inputs over the dataset.
    /// Deterministic when `seed` is given; otherwise uses OS entropy.
    pub fn feature_importance(
        &self,
        dataset: &Dataset,
        repeats: usize,
        seed: Option<u64>,
    ) -> Result<Vec<FeatureImportance>, CodecError> {
        permutation_importance(dataset, self.classifier.as_ref(), &self.codec, repeats, seed)
    }
}

/// Shuffle each feature column `repeats` times and measure the mean drop in
/// classifier accuracy against the recorded loan status.
pub fn permutation_importance(
    dataset: &Dataset,
    classifier: &dyn Classifier,
    codec: &CategoryCodec,
    repeats: usize,
    seed: Option<u64>,
) -> Result<Vec<FeatureImportance>, CodecError> {
    let mut matrix: Vec<[f64; 3]> = Vec::with_capacity(dataset.len());
    let mut labels: Vec<u8> = Vec::with_capacity(dataset.len());
    for record in dataset.records() {
        let code = codec.encode(&record.grade)?;
        matrix.push([code as f64, record.interest_rate, record.income]);
        labels.push(record.loan_status);
    }

    let baseline = accuracy(&matrix, &labels, classifier);
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let repeats = repeats.max(1);

    let mut scores = Vec::with_capacity(FEATURE_NAMES.len());
    for (j, name) in FEATURE_NAMES.iter().enumerate() {
        let mut total_drop = 0.0;
        for _ in 0..repeats {
            let mut column: Vec<f64> = matrix.iter().map(|row| row[j]).collect();
            column.shuffle(&mut rng);
            let mut shuffled = matrix.clone();
            for (row, &v) in shuffled.iter_mut().zip(&column) {
                row[j] = v;
            }
            total_drop += baseline - accuracy(&shuffled, &labels, classifier);
        }
        scores.push(FeatureImportance {
            feature: name.to_string(),
            importance: total_drop / repeats as f64,
        });
    }
    Ok(scores)
}

fn accuracy(rows: &[[f64; 3]], labels: &[u8], classifier: &dyn Classifier) -> f64 {
    let correct = rows
        .iter()
        .zip(labels)
        .filter(|(row, &label)| {
            let features = FeatureVector {
                grade_code: row[0] as i64,
                interest_rate: row[1],
                income: row[2],
            };
            classifier.classify(&features) == label
        })
        .count();
    correct as f64 / rows.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use std::io::Write;

    struct Always(u8);

    impl Classifier for Always {
        fn classify(&self, _features: &FeatureVector) -> u8 {
            self.0
        }
    }

    /// Predicts default iff the interest rate exceeds 10%. Ignores grade
    /// and income entirely.
    struct RateOnly;

    impl Classifier for RateOnly {
        fn classify(&self, features: &FeatureVector) -> u8 {
            (features.interest_rate > 10.0) as u8
        }
    }

    fn service(classifier: impl Classifier + 'static) -> PredictionService {
        PredictionService::new(CategoryCodec::grades(), Arc::new(classifier))
    }

    fn features(grade_code: i64, interest_rate: f64, income: f64) -> FeatureVector {
        FeatureVector {
            grade_code,
            interest_rate,
            income,
        }
    }

    fn record(grade: &str, rate: f64, income: f64, status: u8) -> Record {
        Record {
            age: 30,
            income,
            home_ownership: "RENT".to_string(),
            loan_intent: "PERSONAL".to_string(),
            grade: grade.to_string(),
            loan_amount: 10_000.0,
            interest_rate: rate,
            credit_history_length: 4,
            loan_status: status,
        }
    }

    #[test]
    fn default_outcome_uses_fixed_message() {
        let svc = service(Always(1));
        let result = svc.predict(&features(1, 5.0, 57_000.0)).unwrap();
        assert!(result.default_risk);
        assert_eq!(result.message, DEFAULT_RISK_MESSAGE);
    }

    #[test]
    fn low_risk_outcome_uses_fixed_message() {
        let svc = service(Always(0));
        let result = svc.predict(&features(1, 5.0, 57_000.0)).unwrap();
        assert!(!result.default_risk);
        assert_eq!(result.message, LOW_RISK_MESSAGE);
    }

    #[test]
    fn negative_rate_rejected_before_classifier() {
        let svc = service(Always(1));
        let err = svc.predict(&features(1, -5.0, 57_000.0)).unwrap_err();
        assert!(err.0.contains("interest rate"));
    }

    #[test]
    fn nan_income_rejected() {
        let svc = service(Always(0));
        assert!(svc.predict(&features(1, 5.0, f64::NAN)).is_err());
    }

    #[test]
    fn grade_code_outside_codec_rejected() {
        let svc = service(Always(0));
        assert!(svc.predict(&features(7, 5.0, 57_000.0)).is_err());
        assert!(svc.predict(&features(-1, 5.0, 57_000.0)).is_err());
    }

    #[test]
    fn decision_tree_classifies_by_threshold() {
        let tree = DecisionTreeModel::from_nodes(vec![
            TreeNode::Split {
                feature: 1,
                threshold: 10.0,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { class: 0 },
            TreeNode::Leaf { class: 1 },
        ])
        .unwrap();

        assert_eq!(tree.classify(&features(1, 5.0, 50_000.0)), 0);
        assert_eq!(tree.classify(&features(1, 15.0, 50_000.0)), 1);
    }

    #[test]
    fn tree_with_backward_child_rejected() {
        let err = DecisionTreeModel::from_nodes(vec![
            TreeNode::Leaf { class: 0 },
            TreeNode::Split {
                feature: 0,
                threshold: 1.0,
                left: 0,
                right: 0,
            },
        ])
        .unwrap_err();
        assert!(matches!(err, ModelLoadError::Invalid(_)));
    }

    #[test]
    fn model_loads_from_json_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({
            "nodes": [
                { "kind": "split", "feature": 1, "threshold": 10.0, "left": 1, "right": 2 },
                { "kind": "leaf", "class": 0 },
                { "kind": "leaf", "class": 1 }
            ]
        });
        write!(file, "{json}").unwrap();

        let model = DecisionTreeModel::load(file.path()).unwrap();
        assert_eq!(model.classify(&features(0, 12.0, 40_000.0)), 1);
    }

    #[test]
    fn missing_model_file_is_open_error() {
        let err = DecisionTreeModel::load("/nonexistent/model.json").unwrap_err();
        assert!(matches!(err, ModelLoadError::Open { .. }));
    }

    fn importance_dataset() -> Dataset {
        // status tracks the rate threshold exactly, so rate carries all
        // the signal and grade/income carry none
        let mut records = Vec::new();
        for i in 0..40 {
            let rate = if i % 2 == 0 { 5.0 + i as f64 * 0.1 } else { 12.0 + i as f64 * 0.1 };
            let status = (rate > 10.0) as u8;
            let grade = ["A", "B", "C", "D"][i % 4];
            records.push(record(grade, rate, 30_000.0 + 1_000.0 * i as f64, status));
        }
        Dataset::from_records(records, "test").unwrap()
    }

    #[test]
    fn importance_is_deterministic_under_fixed_seed() {
        let svc = service(RateOnly);
        let ds = importance_dataset();
        let a = svc.feature_importance(&ds, 5, Some(42)).unwrap();
        let b = svc.feature_importance(&ds, 5, Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn ignored_features_score_zero() {
        let svc = service(RateOnly);
        let ds = importance_dataset();
        let scores = svc.feature_importance(&ds, 5, Some(7)).unwrap();

        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0].feature, "Loan Grade");
        assert_eq!(scores[0].importance, 0.0);
        assert!(scores[1].importance > 0.0, "rate carries the signal");
        assert_eq!(scores[2].importance, 0.0);
    }

    #[test]
    fn unknown_grade_in_dataset_is_codec_error() {
        let svc = service(RateOnly);
        let ds = Dataset::from_records(vec![record("Z", 5.0, 30_000.0, 0)], "test").unwrap();
        assert!(svc.feature_importance(&ds, 1, Some(1)).is_err());
    }
}
