// src/api/routes.rs
use actix_web::web;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .route("/evaluate", web::post().to(handlers::start_evaluation))
        .route("/evaluation/{evaluation_id}", web::get().to(handlers::get_evaluation_status))
        .service(
            web::scope("/monitor")
                .route("/setup", web::post().to(handlers::setup_monitoring))
                .route("/metrics/{model_id}", web::get().to(handlers::get_monitoring_metrics))
        )
        .default_service(web::to(handlers::not_found));
}
