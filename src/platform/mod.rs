// src/platform/mod.rs

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::Result;
use crate::models::{EvaluationRun, MonitoringRun};

pub mod azure;
pub mod credential;

pub use azure::AzureAiProjectClient;

/// The managed AI platform that runs evaluations and collects monitoring data.
///
/// This is the seam between the API and the cloud service: production uses
/// [`AzureAiProjectClient`], tests plug in stubs.
#[async_trait]
pub trait AiPlatform: Send + Sync {
    /// Starts an evaluation of `model_id` against `dataset_id` scoring the given metrics.
    async fn create_evaluation(
        &self,
        model_id: &str,
        dataset_id: &str,
        metrics: &[&str],
    ) -> Result<EvaluationRun>;

    /// Reads the current state of an evaluation.
    async fn get_evaluation(&self, evaluation_id: &str) -> Result<EvaluationRun>;

    /// Enables continuous collection of the given metrics for a deployed model.
    async fn create_monitoring(&self, model_id: &str, metrics: &[&str]) -> Result<MonitoringRun>;

    /// Reads the monitoring metrics collected since `start_time` (ISO-8601).
    async fn get_metrics(&self, model_id: &str, start_time: &str) -> Result<Map<String, Value>>;
}
