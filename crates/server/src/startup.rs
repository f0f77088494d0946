use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AppConfig;
use service::categories::CategoryService;
use service::events::LogEventPublisher;
use service::menu_items::MenuItemService;
use service::repositories::{self, DynamoCategoryRepository, DynamoMenuItemRepository};
use service::security::ApiKeyValidator;

use crate::auth::AppState;
use crate::routes;

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Public entry: wire dependencies, build the app, run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_and_validate()?;

    let client =
        repositories::dynamodb::connect(&cfg.dynamodb.region, cfg.dynamodb.endpoint.as_deref())
            .await;
    // Local dev stores start empty; real tables are provisioned externally.
    if cfg.dynamodb.endpoint.is_some() {
        repositories::dynamodb::ensure_tables(
            &client,
            &cfg.dynamodb.menu_items_table,
            &cfg.dynamodb.categories_table,
        )
        .await?;
    }

    let events = Arc::new(LogEventPublisher);
    let menu_items = Arc::new(MenuItemService::new(
        Arc::new(DynamoMenuItemRepository::new(client.clone(), cfg.dynamodb.menu_items_table.clone())),
        events.clone(),
    ));
    let categories = Arc::new(CategoryService::new(
        Arc::new(DynamoCategoryRepository::new(client, cfg.dynamodb.categories_table.clone())),
        events,
    ));

    let validator = Arc::new(ApiKeyValidator::from_config(
        &cfg.auth.api_keys,
        cfg.auth.api_key_permissions.as_deref(),
    ));

    let state = AppState { menu_items, categories, validator };
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting menu service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
