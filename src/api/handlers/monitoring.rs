// src/api/handlers/monitoring.rs
use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{failure, required_field, JsonBody};
use crate::api::AppState;
use crate::models::{MonitoringConfig, MonitoringSnapshot};

#[derive(Serialize)]
pub struct MonitoringSetupResponse {
    pub status: String,
    pub configuration: MonitoringConfig,
}

#[derive(Serialize)]
pub struct MonitoringMetricsResponse {
    pub status: String,
    pub metrics: MonitoringSnapshot,
}

#[derive(Deserialize)]
pub struct MetricsQuery {
    /// ISO-8601 instant to collect metrics from; now when omitted.
    pub start_time: Option<String>,
}

/// POST /monitor/setup - Enable monitoring for a model
pub async fn setup_monitoring(
    state: web::Data<AppState>,
    body: JsonBody,
) -> Result<HttpResponse> {
    let Some(model_id) = required_field(&body, "model_id") else {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "Missing model_id parameter",
            "required": ["model_id"]
        })));
    };

    match state.evaluator.start_monitoring(&model_id).await {
        Ok(configuration) => Ok(HttpResponse::Ok().json(MonitoringSetupResponse {
            status: "monitoring setup complete".to_string(),
            configuration,
        })),
        Err(e) => Ok(failure(e, "monitoring setup failed")),
    }
}

/// GET /monitor/metrics/{model_id} - Current latency and throughput of a model
pub async fn get_monitoring_metrics(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MetricsQuery>,
) -> Result<HttpResponse> {
    let model_id = path.into_inner();

    match state
        .evaluator
        .get_metrics(&model_id, query.start_time.as_deref())
        .await
    {
        Ok(metrics) => Ok(HttpResponse::Ok().json(MonitoringMetricsResponse {
            status: "success".to_string(),
            metrics,
        })),
        Err(e) => Ok(failure(e, "metrics retrieval failed")),
    }
}
