//! LoanLens backend library
//!
//! Two dashboards over a static credit-risk dataset:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        LOANLENS SERVER                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌───────────────┐   ┌─────────────────────┐  │
//! │  │ Handlers │──▶│ Filter Engine │──▶│ Chart Spec Builder  │  │
//! │  │  (Axum)  │   └───────────────┘   └─────────────────────┘  │
//! │  │          │   ┌────────────────────────────────────────┐   │
//! │  │          │──▶│ Prediction Service (tree + importance) │   │
//! │  └──────────┘   └────────────────────────────────────────┘   │
//! │        │               ▲                      ▲              │
//! │        ▼               │                      │              │
//! │  ┌───────────────────────────┐   ┌────────────────────────┐  │
//! │  │ Dataset Store (CSV, once) │   │ Model Artifact (JSON)  │  │
//! │  └───────────────────────────┘   └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The dataset and model are loaded once at startup and shared read-only;
//! every user interaction is a single synchronous cycle of
//! filter -> build specs -> respond.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use logic::dataset::Dataset;
use logic::predict::PredictionService;

pub use error::{AppError, AppResult};

/// Shared application state, built once in `main` and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub predictor: Arc<PredictionService>,
    pub config: config::Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/meta", get(handlers::meta::describe))
        .route("/api/v1/explore", post(handlers::explore::charts))
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route("/api/v1/insights", get(handlers::predict::insights))
        .route("/api/v1/importance", get(handlers::predict::importance))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
