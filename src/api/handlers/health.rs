// src/api/handlers/health.rs
use actix_web::{HttpResponse, Result};
use serde_json::json;

pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "AI Model Evaluation API",
        "version": env!("CARGO_PKG_VERSION")
    })))
}

pub async fn not_found() -> Result<HttpResponse> {
    Ok(HttpResponse::NotFound().json(json!({
        "error": "Not found",
        "message": "The requested endpoint does not exist"
    })))
}
