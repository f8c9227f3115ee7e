// src/api/handlers/evaluations.rs
use actix_web::{web, HttpResponse, Result};
use serde::Serialize;
use serde_json::json;

use super::{failure, required_field, JsonBody};
use crate::api::AppState;

#[derive(Serialize)]
pub struct EvaluationStartedResponse {
    pub status: String,
    pub evaluation_id: String,
    pub timestamp: String,
}

/// POST /evaluate - Start an evaluation and wait for it to finish
pub async fn start_evaluation(
    state: web::Data<AppState>,
    body: JsonBody,
) -> Result<HttpResponse> {
    let (Some(model_id), Some(dataset_id)) = (
        required_field(&body, "model_id"),
        required_field(&body, "dataset_id"),
    ) else {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "Missing required parameters",
            "required": ["model_id", "dataset_id"]
        })));
    };

    match state.evaluator.start_evaluation(&model_id, &dataset_id).await {
        Ok(result) => Ok(HttpResponse::Ok().json(EvaluationStartedResponse {
            status: "evaluation started".to_string(),
            evaluation_id: result.evaluation_id,
            timestamp: result.timestamp,
        })),
        Err(e) => Ok(failure(e, "evaluation failed")),
    }
}

/// GET /evaluation/{evaluation_id} - Read the current state of an evaluation
pub async fn get_evaluation_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let evaluation_id = path.into_inner();

    match state.evaluator.get_status(&evaluation_id).await {
        Ok(status) => Ok(HttpResponse::Ok().json(status)),
        Err(e) => Ok(failure(e, "status check failed")),
    }
}
