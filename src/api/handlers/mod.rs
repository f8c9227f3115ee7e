// src/api/handlers/mod.rs
mod health;
mod evaluations;
mod monitoring;

use actix_web::{HttpResponse, web};
use serde_json::{Value, json};

pub use health::{health_check, not_found};
pub use evaluations::{start_evaluation, get_evaluation_status};
pub use monitoring::{setup_monitoring, get_monitoring_metrics};

/// Request bodies are parsed leniently: a missing or malformed body is
/// treated the same as one without the required fields.
pub type JsonBody = Option<web::Json<Value>>;

/// Returns the named field as a string. `null` counts as absent and other
/// non-string values are stringified.
fn required_field(body: &JsonBody, key: &str) -> Option<String> {
    match body.as_ref()?.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn failure(error: impl ToString, status: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "error": error.to_string(),
        "status": status
    }))
}
