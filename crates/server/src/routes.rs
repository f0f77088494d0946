pub mod categories;
pub mod menu_items;

use axum::middleware;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use common::types::Health;

use crate::auth::{self, AppState};

pub async fn health() -> Json<Health> {
    Json(Health::current())
}

/// Build the full application router: public health endpoint plus the
/// API-key protected menu routes.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new().route("/health", get(health));

    // Everything under /menus/:restaurant_id is gated on restaurant access.
    let menus = Router::new()
        .route(
            "/menus/:restaurant_id/items",
            get(menu_items::list_items).post(menu_items::create_item),
        )
        .route(
            "/menus/:restaurant_id/items/:item_id",
            get(menu_items::get_item)
                .put(menu_items::update_item)
                .delete(menu_items::delete_item),
        )
        .route(
            "/menus/:restaurant_id/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_restaurant_access,
        ));

    public
        .merge(menus)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
