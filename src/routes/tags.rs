use axum::{extract::State, Json};

use crate::{error::AppResult, routes::AppState};

/// Sorted list of every tag in use
pub async fn all_tags(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.catalog.all_tags().await?))
}
