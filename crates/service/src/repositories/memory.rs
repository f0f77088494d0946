//! In-memory repositories over `RwLock<HashMap>`, keyed like the DynamoDB
//! tables. Back the integration tests and local experimentation; ordering
//! matches the store (sort-key order for items, display order for
//! categories).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use models::{Category, MenuItem};
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::repositories::{CategoryRepository, MenuItemRepository};

type Key = (String, String);

#[derive(Clone, Default)]
pub struct InMemoryMenuItemRepository {
    inner: Arc<RwLock<HashMap<Key, MenuItem>>>,
}

impl InMemoryMenuItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuItemRepository for InMemoryMenuItemRepository {
    async fn create(&self, item: MenuItem) -> Result<MenuItem, ServiceError> {
        let mut map = self.inner.write().await;
        map.insert((item.restaurant_id.clone(), item.item_id.clone()), item.clone());
        Ok(item)
    }

    async fn get(&self, restaurant_id: &str, item_id: &str) -> Result<Option<MenuItem>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(&(restaurant_id.to_string(), item_id.to_string())).cloned())
    }

    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<MenuItem>, ServiceError> {
        let map = self.inner.read().await;
        let mut items: Vec<MenuItem> = map
            .values()
            .filter(|item| item.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.item_id.cmp(&b.item_id));
        Ok(items)
    }

    async fn update(&self, item: MenuItem) -> Result<Option<MenuItem>, ServiceError> {
        let mut map = self.inner.write().await;
        let key = (item.restaurant_id.clone(), item.item_id.clone());
        if !map.contains_key(&key) {
            return Ok(None);
        }
        map.insert(key, item.clone());
        Ok(Some(item))
    }

    async fn delete(
        &self,
        restaurant_id: &str,
        item_id: &str,
    ) -> Result<Option<MenuItem>, ServiceError> {
        let mut map = self.inner.write().await;
        Ok(map.remove(&(restaurant_id.to_string(), item_id.to_string())))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCategoryRepository {
    inner: Arc<RwLock<HashMap<Key, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: Category) -> Result<Category, ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(
            (category.restaurant_id.clone(), category.category_id.clone()),
            category.clone(),
        );
        Ok(category)
    }

    async fn get(
        &self,
        restaurant_id: &str,
        category_id: &str,
    ) -> Result<Option<Category>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(&(restaurant_id.to_string(), category_id.to_string())).cloned())
    }

    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<Category>, ServiceError> {
        let map = self.inner.read().await;
        let mut categories: Vec<Category> = map
            .values()
            .filter(|c| c.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        categories.sort_by_key(|c| c.display_order);
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(restaurant_id: &str, item_id: &str, price: f64) -> MenuItem {
        MenuItem {
            restaurant_id: restaurant_id.into(),
            item_id: item_id.into(),
            name: format!("name-{item_id}"),
            description: None,
            price,
            category: None,
            availability: true,
            allergens: vec![],
        }
    }

    #[tokio::test]
    async fn menu_item_crud_round_trip() -> Result<(), anyhow::Error> {
        let repo = InMemoryMenuItemRepository::new();

        repo.create(item("rest_1", "item_b", 9.5)).await?;
        repo.create(item("rest_1", "item_a", 4.0)).await?;
        repo.create(item("rest_2", "item_c", 7.0)).await?;

        let got = repo.get("rest_1", "item_a").await?.unwrap();
        assert_eq!(got.price, 4.0);

        // partition query is scoped and ordered by sort key
        let listed = repo.list_by_restaurant("rest_1").await?;
        assert_eq!(
            listed.iter().map(|i| i.item_id.as_str()).collect::<Vec<_>>(),
            vec!["item_a", "item_b"]
        );

        let mut updated = item("rest_1", "item_a", 5.0);
        updated.name = "renamed".into();
        assert!(repo.update(updated).await?.is_some());
        assert_eq!(repo.get("rest_1", "item_a").await?.unwrap().name, "renamed");

        assert!(repo.update(item("rest_1", "missing", 1.0)).await?.is_none());

        let removed = repo.delete("rest_1", "item_a").await?.unwrap();
        assert_eq!(removed.name, "renamed");
        assert!(repo.delete("rest_1", "item_a").await?.is_none());
        assert!(repo.get("rest_1", "item_a").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn categories_listed_by_display_order() -> Result<(), anyhow::Error> {
        let repo = InMemoryCategoryRepository::new();
        for (id, order) in [("cat_mains", 2), ("cat_apps", 1), ("cat_desserts", 3)] {
            repo.create(Category {
                restaurant_id: "rest_1".into(),
                category_id: id.into(),
                name: id.into(),
                display_order: order,
                parent_category: None,
            })
            .await?;
        }

        let listed = repo.list_by_restaurant("rest_1").await?;
        assert_eq!(
            listed.iter().map(|c| c.category_id.as_str()).collect::<Vec<_>>(),
            vec!["cat_apps", "cat_mains", "cat_desserts"]
        );
        Ok(())
    }
}
