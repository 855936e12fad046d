//! Dataset record and field identifiers

use serde::{Deserialize, Serialize};

/// One row of the credit-risk dataset.
///
/// Field names follow the source CSV schema; extra columns in the file are
/// ignored, missing ones fail the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "person_age")]
    pub age: u32,
    #[serde(rename = "person_income")]
    pub income: f64,
    #[serde(rename = "person_home_ownership")]
    pub home_ownership: String,
    #[serde(rename = "loan_intent")]
    pub loan_intent: String,
    #[serde(rename = "loan_grade")]
    pub grade: String,
    #[serde(rename = "loan_amnt")]
    pub loan_amount: f64,
    #[serde(rename = "loan_int_rate")]
    pub interest_rate: f64,
    #[serde(rename = "cb_person_cred_hist_length")]
    pub credit_history_length: u32,
    #[serde(rename = "loan_status")]
    pub loan_status: u8,
}

/// Numeric columns. Closed set; chart bindings and range filters only ever
/// reference these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Age,
    Income,
    LoanAmount,
    InterestRate,
    CreditHistoryLength,
}

/// Categorical columns. Loan status is 0/1 in the data but is treated as a
/// category (pie slices, color encodings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    HomeOwnership,
    LoanIntent,
    LoanGrade,
    LoanStatus,
}

/// Either kind of column, for hover data and generic display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnyField {
    Numeric(NumericField),
    Categorical(CategoricalField),
}

impl Record {
    /// Value of a numeric column, widened to f64.
    pub fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Age => self.age as f64,
            NumericField::Income => self.income,
            NumericField::LoanAmount => self.loan_amount,
            NumericField::InterestRate => self.interest_rate,
            NumericField::CreditHistoryLength => self.credit_history_length as f64,
        }
    }

    /// Value of a categorical column as its display label.
    pub fn categorical(&self, field: CategoricalField) -> String {
        match field {
            CategoricalField::HomeOwnership => self.home_ownership.clone(),
            CategoricalField::LoanIntent => self.loan_intent.clone(),
            CategoricalField::LoanGrade => self.grade.clone(),
            CategoricalField::LoanStatus => self.loan_status.to_string(),
        }
    }

    /// Any column rendered as a string, for hover payloads.
    pub fn display(&self, field: AnyField) -> String {
        match field {
            AnyField::Numeric(f) => {
                let v = self.numeric(f);
                if v.fract() == 0.0 {
                    format!("{}", v as i64)
                } else {
                    format!("{v}")
                }
            }
            AnyField::Categorical(f) => self.categorical(f),
        }
    }
}

impl NumericField {
    /// Human-readable axis label.
    pub fn label(&self) -> &'static str {
        match self {
            NumericField::Age => "Age",
            NumericField::Income => "Income ($)",
            NumericField::LoanAmount => "Loan Amount ($)",
            NumericField::InterestRate => "Interest Rate (%)",
            NumericField::CreditHistoryLength => "Credit History Length (years)",
        }
    }
}

impl AnyField {
    pub fn label(&self) -> &'static str {
        match self {
            AnyField::Numeric(f) => f.label(),
            AnyField::Categorical(f) => f.label(),
        }
    }
}

impl CategoricalField {
    pub fn label(&self) -> &'static str {
        match self {
            CategoricalField::HomeOwnership => "Homeownership Status",
            CategoricalField::LoanIntent => "Loan Intent",
            CategoricalField::LoanGrade => "Loan Grade",
            CategoricalField::LoanStatus => "Loan Status",
        }
    }
}
