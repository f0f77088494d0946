use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use models::MenuItem;

use crate::auth::AppState;
use crate::errors::ApiError;

pub async fn list_items(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    let items = state.menu_items.list(&restaurant_id).await?;
    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path((restaurant_id, item_id)): Path<(String, String)>,
) -> Result<Json<MenuItem>, ApiError> {
    let item = state
        .menu_items
        .get(&restaurant_id, &item_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("item {item_id} not found for restaurant {restaurant_id}"))
        })?;
    Ok(Json(item))
}

pub async fn create_item(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
    Json(item): Json<MenuItem>,
) -> Result<(StatusCode, Json<MenuItem>), ApiError> {
    if item.restaurant_id != restaurant_id {
        return Err(ApiError::BadRequest(format!(
            "restaurant_id in body ({}) does not match path parameter ({restaurant_id})",
            item.restaurant_id
        )));
    }
    let created = state.menu_items.create(item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path((restaurant_id, item_id)): Path<(String, String)>,
    Json(item): Json<MenuItem>,
) -> Result<Json<MenuItem>, ApiError> {
    if item.restaurant_id != restaurant_id {
        return Err(ApiError::BadRequest(format!(
            "restaurant_id in body ({}) does not match path parameter ({restaurant_id})",
            item.restaurant_id
        )));
    }
    if item.item_id != item_id {
        return Err(ApiError::BadRequest(format!(
            "item_id in body ({}) does not match path parameter ({item_id})",
            item.item_id
        )));
    }
    let updated = state.menu_items.update(item).await?;
    Ok(Json(updated))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path((restaurant_id, item_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.menu_items.delete(&restaurant_id, &item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
