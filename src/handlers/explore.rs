//! Exploration dashboard handler
//!
//! One recomputation cycle per request: translate the control values into
//! filter criteria, re-filter the dataset, rebuild all five chart specs.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::logic::{chart, filter};
use crate::models::{CategoricalField, ChartSpec, FilterCriteria, NumericField, Theme};
use crate::{AppResult, AppState};

/// Raw control values from the filter bar. Absent controls simply leave
/// their predicate out.
#[derive(Debug, Default, Deserialize)]
pub struct ExploreRequest {
    pub home_ownership: Option<String>,
    pub loan_intent: Option<String>,
    /// [min, max], inclusive
    pub income_range: Option<[f64; 2]>,
}

impl ExploreRequest {
    fn into_criteria(self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        if let Some(home) = self.home_ownership {
            criteria = criteria.equals(CategoricalField::HomeOwnership, home);
        }
        if let Some(intent) = self.loan_intent {
            criteria = criteria.equals(CategoricalField::LoanIntent, intent);
        }
        if let Some([min, max]) = self.income_range {
            criteria = criteria.range(NumericField::Income, min, max);
        }
        criteria
    }
}

#[derive(Debug, Serialize)]
pub struct ExploreResponse {
    pub row_count: usize,
    pub charts: Vec<ChartSpec>,
}

pub async fn charts(
    State(state): State<AppState>,
    Json(request): Json<ExploreRequest>,
) -> AppResult<Json<ExploreResponse>> {
    let criteria = request.into_criteria();
    let view = filter::apply(&state.dataset, &criteria);
    tracing::debug!(rows = view.len(), "explore view filtered");

    let charts = chart::explore_charts(&view, &Theme::dark())?;
    Ok(Json(ExploreResponse {
        row_count: view.len(),
        charts,
    }))
}
