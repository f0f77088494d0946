use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::Service;

use server::auth::AppState;
use server::routes;
use service::categories::CategoryService;
use service::events::RecordingEventPublisher;
use service::menu_items::MenuItemService;
use service::repositories::{InMemoryCategoryRepository, InMemoryMenuItemRepository};
use service::security::ApiKeyValidator;

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

fn build_app(api_keys: &str, permissions: Option<&str>) -> Router {
    let events = RecordingEventPublisher::new();
    let state = AppState {
        menu_items: Arc::new(MenuItemService::new(
            Arc::new(InMemoryMenuItemRepository::new()),
            events.clone(),
        )),
        categories: Arc::new(CategoryService::new(
            Arc::new(InMemoryCategoryRepository::new()),
            events,
        )),
        validator: Arc::new(ApiKeyValidator::from_config(api_keys, permissions)),
    };
    routes::build_router(state, cors())
}

fn scoped_app() -> Router {
    build_app(
        "key-rest-123,key-rest-456,admin-key",
        Some("key-rest-123:rest_123;key-rest-456:rest_456;admin-key:*"),
    )
}

async fn get_items(app: &Router, restaurant_id: &str, api_key: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder()
        .method("GET")
        .uri(format!("/menus/{restaurant_id}/items"));
    if let Some(key) = api_key {
        builder = builder.header("X-API-Key", key);
    }
    let req = builder.body(Body::empty()).unwrap();
    let resp = app.clone().call(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn authorized_key_can_list_its_restaurant() {
    let app = scoped_app();
    let (status, _) = get_items(&app, "rest_123", Some("key-rest-123")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unauthorized_key_gets_403_naming_restaurant() {
    let app = scoped_app();
    let (status, body) = get_items(&app, "rest_456", Some("key-rest-123")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("rest_456"), "body should name denied restaurant: {body}");
    assert!(body.to_lowercase().contains("not authorized"));
}

#[tokio::test]
async fn wildcard_key_can_access_any_restaurant() {
    let app = scoped_app();
    let (status, _) = get_items(&app, "rest_999", Some("admin-key")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_key_gets_401() {
    let app = scoped_app();
    let (status, body) = get_items(&app, "rest_123", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.to_lowercase().contains("missing or invalid api key"));
}

#[tokio::test]
async fn unknown_key_gets_401_not_403() {
    let app = scoped_app();
    let (status, _) = get_items(&app, "rest_123", Some("totally-invalid-key")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn legacy_mode_allows_any_restaurant() {
    let app = build_app("dev-key-123,test-key-456", None);
    let (status, _) = get_items(&app, "rest_001", Some("dev-key-123")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get_items(&app, "rest_999", Some("test-key-456")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get_items(&app, "rest_001", Some("unknown")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_permissions_value_is_legacy_mode() {
    let app = build_app("dev-key-123", Some(""));
    let (status, _) = get_items(&app, "rest_any", Some("dev-key-123")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn scoped_key_example_scenario() {
    // config dev-key-123:rest_001;admin-key:* from the service docs
    let app = build_app("dev-key-123,admin-key", Some("dev-key-123:rest_001;admin-key:*"));

    let (status, body) = get_items(&app, "rest_002", Some("dev-key-123")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("rest_002"));

    let (status, _) = get_items(&app, "rest_999", Some("admin-key")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn api_key_accepted_via_query_param() {
    let app = scoped_app();
    let req = Request::builder()
        .method("GET")
        .uri("/menus/rest_123/items?api_key=key-rest-123")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn mutations_require_authorization_too() {
    let app = scoped_app();
    let payload = serde_json::json!({
        "restaurant_id": "rest_456",
        "item_id": "item_1",
        "name": "Pizza",
        "price": 12.99
    });
    let req = Request::builder()
        .method("POST")
        .uri("/menus/rest_456/items")
        .header("content-type", "application/json")
        .header("X-API-Key", "key-rest-123")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();
    let resp = app.clone().call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // the write never happened: the owning key sees an empty menu
    let req = Request::builder()
        .method("GET")
        .uri("/menus/rest_456/items/item_1")
        .header("X-API-Key", "key-rest-456")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_needs_no_key() {
    let app = scoped_app();
    let req = Request::builder().method("GET").uri("/health").body(Body::empty()).unwrap();
    let resp = app.clone().call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "menu-service");
}
