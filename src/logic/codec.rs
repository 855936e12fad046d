//! Categorical codec
//!
//! Bijective mapping between loan-grade letters and the dense integer codes
//! the classifier was trained on. The label set is a static constant, seeded
//! explicitly rather than derived from the dataset.

use thiserror::Error;

/// Grade letters in model-encoding order: A=0 .. G=6.
pub const GRADE_LABELS: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("unknown category label: {0}")]
    UnknownCategory(String),
    #[error("category code {code} out of range (0..{len})")]
    InvalidCode { code: usize, len: usize },
}

/// Label <-> code mapping for one ordered categorical set.
#[derive(Debug, Clone)]
pub struct CategoryCodec {
    labels: Vec<String>,
}

impl CategoryCodec {
    pub fn new(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// The loan-grade codec the prediction model expects.
    pub fn grades() -> Self {
        Self::new(GRADE_LABELS)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label -> code. Unknown labels are a hard input error.
    pub fn encode(&self, label: &str) -> Result<usize, CodecError> {
        self.labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| CodecError::UnknownCategory(label.to_string()))
    }

    /// Code -> label.
    pub fn decode(&self, code: usize) -> Result<&str, CodecError> {
        self.labels
            .get(code)
            .map(String::as_str)
            .ok_or(CodecError::InvalidCode {
                code,
                len: self.labels.len(),
            })
    }

    /// Whether a (possibly negative) code is a valid encoding.
    pub fn contains_code(&self, code: i64) -> bool {
        code >= 0 && (code as usize) < self.labels.len()
    }
}
