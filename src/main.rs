use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use model_eval_api::api::{AppState, configure_routes};
use model_eval_api::{banner, config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    banner::print_banner();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  Warning: Could not load .env file: {}", e);
        eprintln!("   Make sure PROJECT_CONNECTION_STRING and credentials are set in your environment");
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = config::AppConfig::from_env().map_err(|e| {
        log::error!("Failed to load app configuration: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    let host = app_config.server.host.clone();
    let port = app_config.server.port;

    println!("✅ Platform endpoint: {}", app_config.platform.endpoint);
    println!(
        "⏱️  Evaluation polling every {}s, giving up after {}s",
        app_config.polling.interval.as_secs(),
        app_config.polling.timeout.as_secs()
    );

    let state = AppState::new(app_config).map_err(|e| {
        log::error!("Failed to initialise platform client: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    println!("🚀 Starting server on http://{}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
