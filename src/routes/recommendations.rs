use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::Recommendation,
    routes::{extract::ApiQuery, validate_limit, AppState},
};

const DEFAULT_LIMIT: usize = 4;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    limit: Option<usize>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(product_id): Path<String>,
    ApiQuery(params): ApiQuery<RecommendationQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let limit = validate_limit("limit", params.limit, DEFAULT_LIMIT)?;

    let recommendations = state.catalog.recommend(&product_id, limit).await?;

    tracing::info!(
        request_id = %request_id,
        product_id = %product_id,
        returned = recommendations.len(),
        "Recommendations served"
    );

    Ok(Json(recommendations))
}
