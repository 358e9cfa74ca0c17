use actix_cors::Cors;
use actix_web::{error, http, middleware, web, App, HttpResponse, HttpServer};
use corretores_api::config::Settings;
use corretores_api::core::{RateLimiter, SearchEngine};
use corretores_api::models::ErrorResponse;
use corretores_api::routes::{self, directory::AppState};
use corretores_api::services::PostgresClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Malformed request payload, shaped as the uniform JSON error body.
#[derive(Debug)]
pub struct JsonError {
    pub message: String,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> http::StatusCode {
        http::StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::BadRequest().json(ErrorResponse::new(self.message.clone()))
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        message: "Corpo da requisição inválido".to_string(),
    }
    .into()
}

fn build_cors(is_development: bool, allowed_origins: &[String]) -> Cors {
    if is_development || allowed_origins.iter().any(|o| o == "*") {
        return Cors::permissive();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![http::header::CONTENT_TYPE, http::header::ACCEPT])
        .max_age(3600);

    for origin in allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so the [logging] section can act
    // as the fallback for the env vars.
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Initialize logging (RUST_LOG / LOG_FORMAT win over file settings)
    let log_format =
        std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level)),
        )
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting corretores directory service...");
    info!(
        "Configuration loaded (environment: {})",
        settings.app.environment
    );

    // Initialize PostgreSQL client
    let postgres = Arc::new(
        PostgresClient::from_settings(&settings.database)
            .await
            .unwrap_or_else(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                panic!("PostgreSQL connection error: {}", e);
            }),
    );

    info!("PostgreSQL client initialized");

    // Initialize the rate limiter
    let rate_limiter = RateLimiter::new(
        settings.rate_limit.max_requests,
        Duration::from_secs(settings.rate_limit.window_secs),
        settings.rate_limit.max_entries,
    );

    info!(
        "Rate limiter initialized ({} requests / {}s per client)",
        settings.rate_limit.max_requests, settings.rate_limit.window_secs
    );

    // Periodic sweep of lapsed rate-limit windows
    {
        let limiter = rate_limiter.clone();
        let window = Duration::from_secs(settings.rate_limit.window_secs);
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(window * 2);
            loop {
                tick.tick().await;
                limiter.evict_expired(std::time::Instant::now());
            }
        });
    }

    // Build application state
    let app_state = AppState {
        postgres,
        engine: SearchEngine::new(),
        rate_limiter,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let is_development = settings.app.is_development();
    let allowed_origins = settings.cors.allowed_origins.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = build_cors(is_development, &allowed_origins);

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
            .default_service(web::route().to(routes::directory::not_found))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
