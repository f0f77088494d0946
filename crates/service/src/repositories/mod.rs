//! Data access layer. One repository per table, keyed by
//! `(restaurant_id, item_id)` and `(restaurant_id, category_id)`.
//!
//! The store is an external collaborator: point get/put/delete plus
//! query-by-partition, nothing more. Retries, backoff and transactions are
//! its concern, not ours.

pub mod dynamodb;
pub mod memory;

use async_trait::async_trait;
use models::{Category, MenuItem};

use crate::errors::ServiceError;

pub use dynamodb::{DynamoCategoryRepository, DynamoMenuItemRepository};
pub use memory::{InMemoryCategoryRepository, InMemoryMenuItemRepository};

#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    /// Put the item, overwriting any previous record under the same key.
    async fn create(&self, item: MenuItem) -> Result<MenuItem, ServiceError>;
    async fn get(&self, restaurant_id: &str, item_id: &str) -> Result<Option<MenuItem>, ServiceError>;
    /// All items of one restaurant, ordered by item id (partition query order).
    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<MenuItem>, ServiceError>;
    /// Overwrite an existing item; `None` when it does not exist.
    async fn update(&self, item: MenuItem) -> Result<Option<MenuItem>, ServiceError>;
    /// Remove the item, returning the previous record; `None` when it did
    /// not exist. A single store round trip.
    async fn delete(&self, restaurant_id: &str, item_id: &str) -> Result<Option<MenuItem>, ServiceError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> Result<Category, ServiceError>;
    async fn get(
        &self,
        restaurant_id: &str,
        category_id: &str,
    ) -> Result<Option<Category>, ServiceError>;
    /// All categories of one restaurant, sorted ascending by display order.
    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<Category>, ServiceError>;
}
