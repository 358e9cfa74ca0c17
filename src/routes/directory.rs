use crate::core::{RateLimiter, SearchEngine, RATE_LIMIT_MESSAGE};
use crate::models::{ErrorResponse, FilterOptionsResponse, HealthResponse, SearchRequest, SearchResponse};
use crate::services::{PostgresClient, PostgresError};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;

/// Generic upstream failure message. Database error detail is logged
/// server-side and never forwarded to the client.
pub const DB_ERROR_MESSAGE: &str = "Erro na consulta ao banco de dados";

/// Message for a query that exceeded the bounded timeout.
pub const DB_TIMEOUT_MESSAGE: &str = "Tempo de resposta do banco de dados excedido";

/// Message for unmatched routes.
pub const NOT_FOUND_MESSAGE: &str = "Rota não encontrada";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub engine: SearchEngine,
    pub rate_limiter: RateLimiter,
}

/// Configure all directory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/filters", web::get().to(filter_options))
        .route("/search", web::post().to(search));
}

/// Derive the rate-limit key for a request.
///
/// First X-Forwarded-For value when present (the service runs behind a
/// proxy in production), else the peer address, else a shared "unknown"
/// bucket - all unidentifiable clients are throttled together.
pub fn client_key(req: &HttpRequest) -> String {
    if let Some(forwarded) = req.headers().get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn too_many_requests() -> HttpResponse {
    HttpResponse::TooManyRequests().json(ErrorResponse::new(RATE_LIMIT_MESSAGE))
}

fn upstream_error(context: &str, err: &PostgresError) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    if err.is_timeout() {
        HttpResponse::GatewayTimeout().json(ErrorResponse::new(DB_TIMEOUT_MESSAGE))
    } else {
        HttpResponse::InternalServerError().json(ErrorResponse::new(DB_ERROR_MESSAGE))
    }
}

/// Liveness probe. Deliberately unthrottled and database-free so an
/// overloaded or degraded instance still answers its health checks.
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Filter options endpoint
///
/// GET /api/filters
///
/// Returns the distinct specialties and neighborhoods currently present
/// in the directory.
async fn filter_options(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let key = client_key(&req);
    if !state.rate_limiter.check(&key) {
        tracing::debug!("Rate limited filter request from {}", key);
        return too_many_requests();
    }

    match state.engine.filter_options(state.postgres.as_ref()).await {
        Ok(options) => HttpResponse::Ok().json(FilterOptionsResponse {
            specialties: options.specialties,
            neighborhoods: options.neighborhoods,
        }),
        Err(e) => upstream_error("Failed to fetch filter options", &e),
    }
}

/// Search endpoint
///
/// POST /api/search
///
/// Request body:
/// ```json
/// {
///   "searchTerm": "seguro auto",
///   "specialty": "auto",
///   "region": "Aldeota"
/// }
/// ```
///
/// A request with no usable criteria is answered 200 with an empty page;
/// the database is not consulted.
async fn search(
    state: web::Data<AppState>,
    body: web::Json<SearchRequest>,
    req: HttpRequest,
) -> impl Responder {
    let key = client_key(&req);
    if !state.rate_limiter.check(&key) {
        tracing::debug!("Rate limited search request from {}", key);
        return too_many_requests();
    }

    let outcome = state
        .engine
        .search(
            state.postgres.as_ref(),
            body.search_term.as_deref(),
            body.specialty.as_deref(),
            body.region.as_deref(),
        )
        .await;

    match outcome {
        Ok(result) => {
            tracing::info!(
                "Search returned {} providers (reclassified: {:?})",
                result.count,
                result.reclassified_as
            );
            HttpResponse::Ok().json(SearchResponse {
                data: result.data,
                count: result.count,
            })
        }
        Err(e) => upstream_error("Search query failed", &e),
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(ErrorResponse::new(NOT_FOUND_MESSAGE))
}
