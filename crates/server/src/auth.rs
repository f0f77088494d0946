use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use serde::Deserialize;

use service::categories::CategoryService;
use service::menu_items::MenuItemService;
use service::security::ApiKeyValidator;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub menu_items: Arc<MenuItemService>,
    pub categories: Arc<CategoryService>,
    pub validator: Arc<ApiKeyValidator>,
}

#[derive(Deserialize)]
pub(crate) struct RestaurantScope {
    restaurant_id: String,
}

/// Middleware for the `/menus/:restaurant_id/...` subtree: requires a valid
/// `X-API-Key` (or query `api_key`) and authorization for the restaurant in
/// the path, before any handler or repository runs. Authentication failures
/// (401) surface before restaurant scoping (403).
pub async fn require_restaurant_access(
    State(state): State<AppState>,
    Path(scope): Path<RestaurantScope>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = extract_api_key(&req);
    state.validator.check(key.as_deref(), &scope.restaurant_id)?;
    Ok(next.run(req).await)
}

fn extract_api_key(req: &Request) -> Option<String> {
    let from_header = req
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    if from_header.is_some() {
        return from_header;
    }
    // fallback to query param
    req.uri().query().and_then(|q| {
        q.split('&').find_map(|pair| {
            let mut it = pair.splitn(2, '=');
            match (it.next(), it.next()) {
                (Some("api_key"), Some(v)) => Some(v.to_string()),
                _ => None,
            }
        })
    })
}
