mod api;
mod config;
mod database;
mod middleware;
mod models;
mod repository;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::metrics::HttpMetrics;
use crate::config::Config;
use crate::repository::{MongoUserRepository, UnavailableUserRepository, UserRepository};

fn build_cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .expose_headers(vec![actix_web::http::header::CONTENT_TYPE])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    log::info!("🚀 Starting User Search Service...");
    log::info!("📊 Database: {}", config.database_url);

    // A failed connection is not fatal: requests fail one by one instead
    let repository: Arc<dyn UserRepository> = match database::MongoDB::new(&config.database_url).await {
        Ok(db) => {
            log::info!("✅ MongoDB connected successfully ({})", db.name());
            Arc::new(MongoUserRepository::new(db))
        }
        Err(e) => {
            log::error!("❌ Could not connect to MongoDB: {}", e);
            Arc::new(UnavailableUserRepository::new(e.to_string()))
        }
    };

    let repo_data = web::Data::from(repository);
    let metrics = Arc::new(HttpMetrics::default());
    let metrics_data = web::Data::from(Arc::clone(&metrics));
    let allowed_origins = config.allowed_origins.clone();

    log::info!("🌐 Server is running on http://{}", config.bind_address());
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", config.bind_address());
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", config.bind_address());

    // Start HTTP server
    HttpServer::new(move || {
        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(repo_data.clone())
            .app_data(metrics_data.clone())
            .wrap(build_cors(&allowed_origins))
            .wrap(middleware::RequestMetrics::new(Arc::clone(&metrics)))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi),
            )
            .configure(api::configure)
    })
    .bind(config.bind_address())?
    .run()
    .await
}
