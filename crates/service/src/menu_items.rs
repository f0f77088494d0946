use std::sync::Arc;

use models::MenuItem;
use tracing::{instrument, warn};

use crate::errors::ServiceError;
use crate::events::{ChangeAction, ChangeEvent, EventPublisher};
use crate::repositories::MenuItemRepository;

/// Validation and orchestration for menu items. Publishes a change event
/// after every successful mutation; publisher failures are logged and never
/// fail the request (the bus delivers at-least-once downstream).
pub struct MenuItemService {
    repo: Arc<dyn MenuItemRepository>,
    events: Arc<dyn EventPublisher>,
}

impl MenuItemService {
    pub fn new(repo: Arc<dyn MenuItemRepository>, events: Arc<dyn EventPublisher>) -> Self {
        Self { repo, events }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, restaurant_id: &str) -> Result<Vec<MenuItem>, ServiceError> {
        self.repo.list_by_restaurant(restaurant_id).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, restaurant_id: &str, item_id: &str) -> Result<Option<MenuItem>, ServiceError> {
        self.repo.get(restaurant_id, item_id).await
    }

    #[instrument(skip(self, item), fields(restaurant_id = %item.restaurant_id, item_id = %item.item_id))]
    pub async fn create(&self, item: MenuItem) -> Result<MenuItem, ServiceError> {
        item.validate()?;
        let created = self.repo.create(item).await?;
        self.emit(ChangeEvent::menu_item(ChangeAction::Created, &created)).await;
        Ok(created)
    }

    #[instrument(skip(self, item), fields(restaurant_id = %item.restaurant_id, item_id = %item.item_id))]
    pub async fn update(&self, item: MenuItem) -> Result<MenuItem, ServiceError> {
        item.validate()?;
        let (restaurant_id, item_id) = (item.restaurant_id.clone(), item.item_id.clone());
        let updated = self
            .repo
            .update(item)
            .await?
            .ok_or_else(|| ServiceError::item_not_found(&restaurant_id, &item_id))?;
        self.emit(ChangeEvent::menu_item(ChangeAction::Updated, &updated)).await;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, restaurant_id: &str, item_id: &str) -> Result<(), ServiceError> {
        // The store hands back the removed record, so the event payload
        // needs no extra read.
        let removed = self
            .repo
            .delete(restaurant_id, item_id)
            .await?
            .ok_or_else(|| ServiceError::item_not_found(restaurant_id, item_id))?;
        self.emit(ChangeEvent::menu_item(ChangeAction::Deleted, &removed)).await;
        Ok(())
    }

    async fn emit(&self, event: ChangeEvent) {
        if let Err(e) = self.events.publish(event).await {
            warn!(error = %e, "change event publication failed");
        }
    }
}
