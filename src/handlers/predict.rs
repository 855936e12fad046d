//! Prediction dashboard handlers
//!
//! Point prediction plus the two supporting charts: the model-input scatter
//! and the permutation feature-importance bars.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::logic::chart;
use crate::logic::filter;
use crate::models::{
    AnyField, BarSeries, CategoricalField, ChartKind, ChartSpec, FeatureVector, FieldBindings,
    FilterCriteria, NumericField, PredictionResult, Theme,
};
use crate::{AppError, AppResult, AppState};

/// Classify one feature vector. Invalid input comes back as a 400 with the
/// message rendered inline; the session keeps running.
pub async fn predict(
    State(state): State<AppState>,
    Json(features): Json<FeatureVector>,
) -> AppResult<Json<PredictionResult>> {
    let result = state.predictor.predict(&features)?;
    tracing::debug!(default_risk = result.default_risk, "prediction served");
    Ok(Json(result))
}

/// Scatter of the model inputs over the full dataset: income vs interest
/// rate, colored by loan status, grade letter on hover.
pub async fn insights(State(state): State<AppState>) -> AppResult<Json<ChartSpec>> {
    let view = filter::apply(&state.dataset, &FilterCriteria::new());
    let bindings = FieldBindings {
        x: Some(NumericField::Income),
        y: Some(NumericField::InterestRate),
        color: Some(CategoricalField::LoanStatus),
        hover: vec![AnyField::Categorical(CategoricalField::LoanGrade)],
        ..FieldBindings::titled("Loan Interest Rate vs Income")
    };
    let spec = chart::build(ChartKind::Scatter, &view, &bindings, &Theme::light())?;
    Ok(Json(spec))
}

#[derive(Debug, Default, Deserialize)]
pub struct ImportanceParams {
    /// Fixed seed for reproducible scores; OS entropy when absent.
    pub seed: Option<u64>,
    pub repeats: Option<usize>,
}

const DEFAULT_REPEATS: usize = 5;

/// Permutation feature importance as a bar chart. The computation is
/// proportional to rows x features x repeats, so it runs on the blocking
/// pool instead of stalling other requests.
pub async fn importance(
    State(state): State<AppState>,
    Query(params): Query<ImportanceParams>,
) -> AppResult<Json<ChartSpec>> {
    let dataset = state.dataset.clone();
    let predictor = state.predictor.clone();
    let repeats = params.repeats.unwrap_or(DEFAULT_REPEATS);
    let seed = params.seed;

    let scores = tokio::task::spawn_blocking(move || {
        predictor.feature_importance(&dataset, repeats, seed)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("importance task failed: {e}")))??;

    let series = BarSeries {
        labels: scores.iter().map(|s| s.feature.clone()).collect(),
        values: scores.iter().map(|s| s.importance).collect(),
    };
    let spec = chart::importance_chart(series, &Theme::light())?;
    Ok(Json(spec))
}
