// src/api/state.rs
use crate::config::AppConfig;
use crate::errors::Result;
use crate::evaluator::ModelEvaluator;
use crate::platform::{AiPlatform, AzureAiProjectClient};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub evaluator: Arc<ModelEvaluator>,
}

impl AppState {
    /// Connects to the configured AI project.
    pub fn new(config: AppConfig) -> Result<Self> {
        let platform = Arc::new(AzureAiProjectClient::from_config(&config.platform)?);
        Ok(Self::with_platform(config, platform))
    }

    pub fn with_platform(config: AppConfig, platform: Arc<dyn AiPlatform>) -> Self {
        let evaluator = ModelEvaluator::new(platform, config.polling.clone());
        Self {
            config: Arc::new(config),
            evaluator: Arc::new(evaluator),
        }
    }
}
