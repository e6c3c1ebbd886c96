use actix_web::{web, App, HttpServer, middleware::Logger};
use actix_cors::Cors;
use dotenv::dotenv;
use std::net::TcpListener;
use std::sync::Arc;

use inspiration_server::clients::OpenAIClient;
use inspiration_server::config::init_config;
use inspiration_server::db::repositories::{ProjectRepository, TaskRepository, WaitlistRepository};
use inspiration_server::generation::{DraftGenerator, GenerationConfig};
use inspiration_server::handlers;
use inspiration_server::routes::{configure_public_routes, configure_routes};
use inspiration_server::services::InspirationService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Load application settings
    let app_settings = match init_config() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load application settings: {}", e);
            log::error!("Cannot start server without valid settings");
            std::process::exit(1);
        }
    };

    let openai_client = match OpenAIClient::new(&app_settings.llm) {
        Ok(client) => {
            log::info!("Completion client initialized for model {}", app_settings.llm.model);
            Arc::new(client)
        }
        Err(e) => {
            log::error!("Failed to initialize completion client: {}", e);
            std::process::exit(1);
        }
    };

    // Stores are shared across workers
    let project_repository = ProjectRepository::new();
    let task_repository = TaskRepository::new();
    let waitlist_repository = WaitlistRepository::new();

    let generator = DraftGenerator::new(openai_client, GenerationConfig::from(&app_settings.llm));
    let inspiration_service = web::Data::new(InspirationService::new(
        Arc::new(project_repository.clone()),
        generator,
    ));
    let project_repository = web::Data::new(project_repository);
    let task_repository = web::Data::new(task_repository);
    let waitlist_repository = web::Data::new(waitlist_repository);

    // Get server host and port from settings
    let host = &app_settings.server.host;
    let port = app_settings.server.port;

    log::info!(
        "Starting {} ({}) at http://{}:{}",
        app_settings.app.name, app_settings.app.environment, host, port
    );

    let server_addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(server_addr)?;

    HttpServer::new(move || {
        let app_settings = app_settings.clone();

        // Configure CORS using actix-cors
        let mut cors = Cors::default()
            .supports_credentials();

        if app_settings.server.cors_origins.contains(&"*".to_string()) {
            cors = cors.allow_any_origin();
        } else {
            for origin in &app_settings.server.cors_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        cors = cors
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(app_settings))
            .app_data(project_repository.clone())
            .app_data(task_repository.clone())
            .app_data(waitlist_repository.clone())
            .app_data(inspiration_service.clone())
            // Register health check endpoint without identity
            .service(handlers::health::health_check)
            .service(
                web::scope("/api")
                    .configure(configure_routes)
            )
            .configure(configure_public_routes)
    })
    .listen(listener)?
    .run()
    .await
}
