use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use models::Category;

use crate::auth::AppState;
use crate::errors::ApiError;

pub async fn list_categories(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.categories.list(&restaurant_id).await?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
    Json(category): Json<Category>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    if category.restaurant_id != restaurant_id {
        return Err(ApiError::BadRequest(format!(
            "restaurant_id in body ({}) does not match path parameter ({restaurant_id})",
            category.restaurant_id
        )));
    }
    let created = state.categories.create(category).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
