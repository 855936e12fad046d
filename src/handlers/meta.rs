//! Dataset metadata handler
//!
//! Serves everything the UI needs to seed its controls deterministically:
//! dropdown options in first-seen order, income slider bounds, grade labels.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::logic::dataset::NumericSummary;
use crate::models::CategoricalField;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub row_count: usize,
    pub home_ownership: Vec<String>,
    pub loan_intent: Vec<String>,
    pub income_bounds: NumericSummary,
    pub grade_labels: Vec<String>,
}

pub async fn describe(State(state): State<AppState>) -> Json<MetaResponse> {
    let dataset = &state.dataset;
    Json(MetaResponse {
        row_count: dataset.len(),
        home_ownership: dataset.distinct_values(CategoricalField::HomeOwnership),
        loan_intent: dataset.distinct_values(CategoricalField::LoanIntent),
        income_bounds: dataset.income_slider_bounds(),
        grade_labels: state.predictor.codec().labels().to_vec(),
    })
}
