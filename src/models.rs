// src/models.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Metric name to score, relayed exactly as the platform reports it.
pub type MetricScores = Map<String, Value>;

/// Lifecycle state of a platform evaluation run.
///
/// The platform reports states as plain strings. Known states map to their
/// variants by exact, case-sensitive match; anything else is kept verbatim
/// in `Other` so it can be relayed unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EvaluationStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
    Other(String),
}

impl EvaluationStatus {
    /// Whether the platform will make no further progress on the run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EvaluationStatus::Completed | EvaluationStatus::Failed | EvaluationStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            EvaluationStatus::Pending => "Pending",
            EvaluationStatus::Running => "Running",
            EvaluationStatus::Completed => "Completed",
            EvaluationStatus::Failed => "Failed",
            EvaluationStatus::Cancelled => "Cancelled",
            EvaluationStatus::Other(s) => s,
        }
    }
}

impl From<String> for EvaluationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pending" => EvaluationStatus::Pending,
            "Running" => EvaluationStatus::Running,
            "Completed" => EvaluationStatus::Completed,
            "Failed" => EvaluationStatus::Failed,
            "Cancelled" => EvaluationStatus::Cancelled,
            _ => EvaluationStatus::Other(value),
        }
    }
}

impl From<EvaluationStatus> for String {
    fn from(status: EvaluationStatus) -> Self {
        match status {
            EvaluationStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluation run as returned by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRun {
    pub id: String,
    pub status: EvaluationStatus,
    #[serde(default)]
    pub metrics: Option<MetricScores>,
}

/// Monitoring configuration as returned by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringRun {
    pub id: String,
    pub status: String,
}

/// Read view of an evaluation handed back to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub evaluation_id: String,
    pub status: EvaluationStatus,
    /// Only populated once the run has `Completed`.
    pub metrics: Option<MetricScores>,
    pub timestamp: String,
}

impl EvaluationResult {
    pub fn from_run(evaluation_id: &str, run: EvaluationRun) -> Self {
        let metrics = match run.status {
            EvaluationStatus::Completed => run.metrics,
            _ => None,
        };
        Self {
            evaluation_id: evaluation_id.to_string(),
            status: run.status,
            metrics,
            timestamp: now_iso(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub monitoring_id: String,
    pub model_id: String,
    pub status: String,
    pub configured_metrics: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub latency: Option<f64>,
    pub throughput: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringSnapshot {
    pub model_id: String,
    pub performance_metrics: PerformanceMetrics,
    pub timestamp: String,
}

/// Current UTC time as an RFC 3339 string.
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_matches_completed_exactly() {
        assert_eq!(EvaluationStatus::from("Completed".to_string()), EvaluationStatus::Completed);
        assert_eq!(
            EvaluationStatus::from("completed".to_string()),
            EvaluationStatus::Other("completed".to_string())
        );
        assert!(!EvaluationStatus::from("COMPLETED".to_string()).is_terminal());
    }

    #[test]
    fn test_terminal_states() {
        assert!(EvaluationStatus::Completed.is_terminal());
        assert!(EvaluationStatus::Failed.is_terminal());
        assert!(EvaluationStatus::Cancelled.is_terminal());
        assert!(!EvaluationStatus::Pending.is_terminal());
        assert!(!EvaluationStatus::Running.is_terminal());
    }

    #[test]
    fn test_unknown_status_is_relayed_verbatim() {
        let run: EvaluationRun =
            serde_json::from_value(json!({"id": "e1", "status": "Queued"})).unwrap();
        assert_eq!(run.status, EvaluationStatus::Other("Queued".to_string()));
        assert_eq!(run.metrics, None);

        let out = serde_json::to_value(&run).unwrap();
        assert_eq!(out["status"], "Queued");
    }

    #[test]
    fn test_result_drops_metrics_unless_completed() {
        let mut metrics = MetricScores::new();
        metrics.insert("F1".to_string(), json!(0.9));

        let running = EvaluationRun {
            id: "e1".to_string(),
            status: EvaluationStatus::Running,
            metrics: Some(metrics.clone()),
        };
        assert_eq!(EvaluationResult::from_run("e1", running).metrics, None);

        let done = EvaluationRun {
            id: "e1".to_string(),
            status: EvaluationStatus::Completed,
            metrics: Some(metrics.clone()),
        };
        let result = EvaluationResult::from_run("e1", done);
        assert_eq!(result.metrics, Some(metrics));
        assert!(chrono::DateTime::parse_from_rfc3339(&result.timestamp).is_ok());
    }

    #[test]
    fn test_metric_values_are_relayed_as_reported() {
        let run: EvaluationRun = serde_json::from_value(json!({
            "id": "e1",
            "status": "Completed",
            "metrics": {"F1": 1, "precision": 0.75, "coherence": null}
        }))
        .unwrap();

        let result = EvaluationResult::from_run("e1", run);
        let out = serde_json::to_value(&result).unwrap();
        assert_eq!(out["metrics"], json!({"F1": 1, "precision": 0.75, "coherence": null}));
        assert_eq!(out["metrics"]["F1"].to_string(), "1");
    }

    #[test]
    fn test_non_numeric_metrics_do_not_break_running_run() {
        let run: EvaluationRun = serde_json::from_value(json!({
            "id": "e2",
            "status": "Running",
            "metrics": {"F1": null, "relevance": "pending"}
        }))
        .unwrap();

        assert_eq!(EvaluationResult::from_run("e2", run).metrics, None);
    }
}
