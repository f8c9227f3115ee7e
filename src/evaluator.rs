// src/evaluator.rs
use std::sync::Arc;

use crate::config::PollingConfig;
use crate::errors::{PlatformError, Result};
use crate::models::{
    EvaluationResult, EvaluationRun, MonitoringConfig, MonitoringSnapshot, PerformanceMetrics,
    now_iso,
};
use crate::platform::AiPlatform;

/// Metrics every evaluation is scored on.
pub const EVALUATION_METRICS: [&str; 4] = ["precision", "coherence", "F1", "relevance"];

/// Metrics collected for every monitored model.
pub const MONITORING_METRICS: [&str; 2] = ["latency", "throughput"];

/// Translates API operations into platform calls and shapes the answers.
///
/// Holds no per-evaluation state: every read goes to the platform.
pub struct ModelEvaluator {
    platform: Arc<dyn AiPlatform>,
    polling: PollingConfig,
}

impl ModelEvaluator {
    pub fn new(platform: Arc<dyn AiPlatform>, polling: PollingConfig) -> Self {
        Self { platform, polling }
    }

    /// Starts an evaluation and waits for it to reach a terminal state.
    ///
    /// Waiting is bounded by the polling timeout; dropping the returned
    /// future stops polling.
    pub async fn start_evaluation(&self, model_id: &str, dataset_id: &str) -> Result<EvaluationResult> {
        log::info!("Starting evaluation of model {} on dataset {}", model_id, dataset_id);

        self.run_evaluation(model_id, dataset_id)
            .await
            .inspect_err(|e| log::error!("Error during model evaluation: {}", e))
    }

    async fn run_evaluation(&self, model_id: &str, dataset_id: &str) -> Result<EvaluationResult> {
        let evaluation = self
            .platform
            .create_evaluation(model_id, dataset_id, &EVALUATION_METRICS)
            .await?;
        log::info!("Evaluation {} created ({})", evaluation.id, evaluation.status);

        let finished = self.wait_for_completion(&evaluation.id).await?;
        Ok(EvaluationResult::from_run(&evaluation.id, finished))
    }

    async fn wait_for_completion(&self, evaluation_id: &str) -> Result<EvaluationRun> {
        match tokio::time::timeout(self.polling.timeout, self.poll_until_terminal(evaluation_id)).await {
            Ok(result) => result,
            Err(_) => Err(PlatformError::Timeout {
                evaluation_id: evaluation_id.to_string(),
                waited_secs: self.polling.timeout.as_secs(),
            }),
        }
    }

    async fn poll_until_terminal(&self, evaluation_id: &str) -> Result<EvaluationRun> {
        loop {
            let run = self.platform.get_evaluation(evaluation_id).await?;
            if run.status.is_terminal() {
                log::info!("Evaluation {} finished with status {}", evaluation_id, run.status);
                return Ok(run);
            }
            log::debug!("Evaluation {} is {}, polling again", evaluation_id, run.status);
            tokio::time::sleep(self.polling.interval).await;
        }
    }

    /// Reads the status of an evaluation; metrics are only included once it has `Completed`.
    pub async fn get_status(&self, evaluation_id: &str) -> Result<EvaluationResult> {
        self.platform
            .get_evaluation(evaluation_id)
            .await
            .map(|run| EvaluationResult::from_run(evaluation_id, run))
            .inspect_err(|e| log::error!("Error getting evaluation status: {}", e))
    }

    pub async fn start_monitoring(&self, model_id: &str) -> Result<MonitoringConfig> {
        self.platform
            .create_monitoring(model_id, &MONITORING_METRICS)
            .await
            .map(|monitoring| MonitoringConfig {
                monitoring_id: monitoring.id,
                model_id: model_id.to_string(),
                status: monitoring.status,
                configured_metrics: MONITORING_METRICS.iter().map(|m| m.to_string()).collect(),
                timestamp: now_iso(),
            })
            .inspect_err(|e| log::error!("Error setting up model monitoring: {}", e))
    }

    /// Reads latency and throughput since `start_time`, defaulting to now.
    /// Any other metric the platform reports is dropped.
    pub async fn get_metrics(&self, model_id: &str, start_time: Option<&str>) -> Result<MonitoringSnapshot> {
        let start_time = start_time.map(str::to_string).unwrap_or_else(now_iso);

        self.platform
            .get_metrics(model_id, &start_time)
            .await
            .map(|metrics| MonitoringSnapshot {
                model_id: model_id.to_string(),
                performance_metrics: PerformanceMetrics {
                    latency: metrics.get("latency").and_then(|v| v.as_f64()),
                    throughput: metrics.get("throughput").and_then(|v| v.as_f64()),
                },
                timestamp: now_iso(),
            })
            .inspect_err(|e| log::error!("Error getting monitoring metrics: {}", e))
    }
}
