//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the credit-risk CSV dataset
    pub dataset_path: String,

    /// Path to the serialized decision-tree artifact
    pub model_path: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            dataset_path: env::var("LOANLENS_DATASET")
                .unwrap_or_else(|_| "credit_risk_dataset.csv".to_string()),

            model_path: env::var("LOANLENS_MODEL")
                .unwrap_or_else(|_| "decision_tree_model.json".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
