use actix_cors::Cors;
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use swipe_match::config::Settings;
use swipe_match::models::ErrorResponse;
use swipe_match::routes::{self, AppState};
use swipe_match::services::{CachedUserDirectory, PostgresClient, UserDirectory};
use swipe_match::MatchingEngine;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Handle JSON payload errors
fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let body = ErrorResponse::new("invalid_json", format!("Invalid JSON: {}", err), 400);
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Handle query payload errors
fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    let body = ErrorResponse::new("invalid_query", format!("Invalid query: {}", err), 400);
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Handle path segment errors, e.g. a non-numeric user id
fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    let body = ErrorResponse::new("INVALID_PARAMETER", format!("Invalid parameter value: {}", err), 400);
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    // LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());
    init_logging(&log_level, &log_format);

    info!("Starting swipe-match service...");

    let postgres = match PostgresClient::from_settings(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to connect to PostgreSQL: {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    info!("PostgreSQL client initialized");

    let directory: Arc<dyn UserDirectory> = postgres.clone();
    let users = Arc::new(CachedUserDirectory::new(
        directory,
        settings.cache.user_cache_size,
        settings.cache.ttl_secs,
    ));

    info!(
        "User cache initialized ({} entries, TTL: {}s)",
        settings.cache.user_cache_size, settings.cache.ttl_secs
    );

    let engine = MatchingEngine::new(users, postgres.clone(), postgres);

    let app_state = AppState {
        engine,
        matching: settings.matching.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
