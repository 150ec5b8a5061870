use axum::{
    http::{Method, StatusCode},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, AppResult},
    middleware::{make_span_with_request_id, request_id_middleware},
    services::CatalogService,
};

pub mod extract;
pub mod products;
pub mod recommendations;
pub mod tags;

/// Largest page size any procedure accepts
pub const MAX_LIMIT: usize = 50;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(cors),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list).post(products::create))
        .route("/products/all", get(products::all))
        .route("/products/random", get(products::random))
        .route("/products/featured", get(products::featured))
        .route("/products/shuffled", get(products::shuffled))
        .route("/products/by-tags", get(products::by_tags))
        .route("/products/search", get(products::search))
        .route(
            "/products/:id/recommendations",
            get(recommendations::recommend),
        )
        .route("/products/:id/clicks", post(products::track_click))
        .route("/tags", get(tags::all_tags))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Resolves an optional page size against its default, rejecting values outside `1..=MAX_LIMIT`
pub(crate) fn validate_limit(name: &str, value: Option<usize>, default: usize) -> AppResult<usize> {
    let value = value.unwrap_or(default);
    if value == 0 || value > MAX_LIMIT {
        return Err(AppError::InvalidInput(format!(
            "{} must be between 1 and {}",
            name, MAX_LIMIT
        )));
    }
    Ok(value)
}

/// Treats an empty string the same as an absent parameter
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_limit_default_and_bounds() {
        assert_eq!(validate_limit("limit", None, 10).unwrap(), 10);
        assert_eq!(validate_limit("limit", Some(50), 10).unwrap(), 50);
        assert!(validate_limit("limit", Some(0), 10).is_err());
        assert!(validate_limit("limit", Some(51), 10).is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("gift".to_string())), Some("gift".to_string()));
    }
}
