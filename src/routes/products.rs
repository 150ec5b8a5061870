use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{NewProduct, Product, ProductPage, SearchPage, SortBy},
    routes::{extract::ApiQuery, non_empty, validate_limit, AppState},
};

const DEFAULT_LIST_LIMIT: usize = 10;
const DEFAULT_SHUFFLE_COUNT: usize = 12;
const DEFAULT_SEARCH_LIMIT: usize = 12;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    limit: Option<usize>,
    #[serde(default)]
    offset: usize,
    category: Option<String>,
    seed: Option<i64>,
}

/// Seeded, paginated product listing
pub async fn list(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiQuery(params): ApiQuery<ListQuery>,
) -> AppResult<Json<ProductPage>> {
    let limit = validate_limit("limit", params.limit, DEFAULT_LIST_LIMIT)?;
    let category = non_empty(params.category);

    tracing::info!(
        request_id = %request_id,
        limit,
        offset = params.offset,
        category = ?category,
        seed = ?params.seed,
        "Listing products"
    );

    let page = state
        .catalog
        .list_products(limit, params.offset, category, params.seed)
        .await?;

    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
pub struct ShuffleQuery {
    count: Option<usize>,
    category: Option<String>,
}

/// A freshly shuffled batch of products
pub async fn shuffled(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ShuffleQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let count = validate_limit("count", params.count, DEFAULT_SHUFFLE_COUNT)?;
    let products = state
        .catalog
        .shuffled(count, non_empty(params.category))
        .await?;
    Ok(Json(products))
}

/// Every product, newest first
pub async fn all(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(state.catalog.all().await?))
}

/// One random product, or null for an empty catalog
pub async fn random(State(state): State<AppState>) -> AppResult<Json<Option<Product>>> {
    Ok(Json(state.catalog.random().await?))
}

/// The most recent featured product, or null
pub async fn featured(State(state): State<AppState>) -> AppResult<Json<Option<Product>>> {
    Ok(Json(state.catalog.daily_featured().await?))
}

#[derive(Debug, Deserialize)]
pub struct ByTagsQuery {
    /// Comma-separated tag list
    tags: Option<String>,
}

/// Products carrying any of the given tags
pub async fn by_tags(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ByTagsQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let tags: Vec<String> = params
        .tags
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Json(state.catalog.by_tags(&tags).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    q: String,
    limit: Option<usize>,
    #[serde(default)]
    offset: usize,
    #[serde(default)]
    sort_by: SortBy,
    category: Option<String>,
}

/// Text search with relevance or date/title ordering
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiQuery(params): ApiQuery<SearchQuery>,
) -> AppResult<Json<SearchPage>> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput("q must not be empty".to_string()));
    }
    let limit = validate_limit("limit", params.limit, DEFAULT_SEARCH_LIMIT)?;

    tracing::info!(
        request_id = %request_id,
        query,
        sort_by = ?params.sort_by,
        "Searching products"
    );

    let page = state
        .catalog
        .search(query, params.sort_by, limit, params.offset, non_empty(params.category))
        .await?;

    Ok(Json(page))
}

/// Adds a product to the catalog
pub async fn create(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<NewProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    tracing::info!(request_id = %request_id, title = %request.title, "Creating product");

    let product = state.catalog.create(request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickCount {
    product_id: String,
    click_count: i64,
}

/// Records one outbound click on a product
pub async fn track_click(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ClickCount>> {
    let click_count = state.catalog.track_click(&product_id).await?;

    tracing::debug!(request_id = %request_id, product_id = %product_id, click_count, "Click tracked");

    Ok(Json(ClickCount {
        product_id,
        click_count,
    }))
}
