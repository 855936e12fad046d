//! LoanLens server binary
//!
//! Loads the dataset and model once, then serves the dashboard API locally.
//! A failed load aborts startup with a diagnostic; per-request errors never
//! take the server down.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loanlens::config::Config;
use loanlens::logic::codec::CategoryCodec;
use loanlens::logic::dataset::Dataset;
use loanlens::logic::predict::{DecisionTreeModel, PredictionService};
use loanlens::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loanlens=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("LoanLens server starting...");

    // Load the dataset and model once; both are startup-fatal on failure
    let dataset = Dataset::load(&config.dataset_path)
        .with_context(|| format!("loading dataset from {}", config.dataset_path))?;
    tracing::info!(rows = dataset.len(), "Dataset loaded");

    let model = DecisionTreeModel::load(&config.model_path)
        .with_context(|| format!("loading model from {}", config.model_path))?;
    tracing::info!("Model artifact loaded");

    // Build application state
    let state = AppState {
        dataset: Arc::new(dataset),
        predictor: Arc::new(PredictionService::new(
            CategoryCodec::grades(),
            Arc::new(model),
        )),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server (local interactive dashboard, loopback only)
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
