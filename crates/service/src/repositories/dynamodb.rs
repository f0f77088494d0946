//! DynamoDB-backed repositories.
//!
//! Tables are plain key-value: partition key `restaurant_id`, sort key
//! `item_id` / `category_id`. Prices are stored as number attributes,
//! allergens as a string set (omitted when empty, DynamoDB rejects empty
//! sets).

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType, ReturnValue,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use models::{Category, MenuItem};
use tracing::info;

use crate::errors::ServiceError;
use crate::repositories::{CategoryRepository, MenuItemRepository};

type Item = HashMap<String, AttributeValue>;

/// Build a DynamoDB client. `endpoint` overrides the target for local
/// development stores (docker / localstack); unset means real AWS.
pub async fn connect(region: &str, endpoint: Option<&str>) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()));
    if let Some(url) = endpoint {
        loader = loader.endpoint_url(url);
    }
    let config = loader.load().await;
    Client::new(&config)
}

/// Create the menu tables against a local endpoint when they are missing.
/// Only meant for dev/test stores; production tables are provisioned
/// externally.
pub async fn ensure_tables(
    client: &Client,
    menu_items_table: &str,
    categories_table: &str,
) -> Result<(), ServiceError> {
    ensure_table(client, menu_items_table, "item_id").await?;
    ensure_table(client, categories_table, "category_id").await?;
    Ok(())
}

async fn ensure_table(client: &Client, table: &str, sort_key: &str) -> Result<(), ServiceError> {
    if client.describe_table().table_name(table).send().await.is_ok() {
        return Ok(());
    }

    let attr = |name: &str| {
        AttributeDefinition::builder()
            .attribute_name(name)
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|e| ServiceError::Store(e.to_string()))
    };
    let key = |name: &str, key_type: KeyType| {
        KeySchemaElement::builder()
            .attribute_name(name)
            .key_type(key_type)
            .build()
            .map_err(|e| ServiceError::Store(e.to_string()))
    };

    client
        .create_table()
        .table_name(table)
        .attribute_definitions(attr("restaurant_id")?)
        .attribute_definitions(attr(sort_key)?)
        .key_schema(key("restaurant_id", KeyType::Hash)?)
        .key_schema(key(sort_key, KeyType::Range)?)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .map_err(|e| ServiceError::Store(e.to_string()))?;
    info!(%table, "created missing table");
    Ok(())
}

pub struct DynamoMenuItemRepository {
    client: Client,
    table_name: String,
}

impl DynamoMenuItemRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self { client, table_name: table_name.into() }
    }

    fn marshal(item: &MenuItem) -> Item {
        let mut record = HashMap::new();
        record.insert("restaurant_id".to_string(), AttributeValue::S(item.restaurant_id.clone()));
        record.insert("item_id".to_string(), AttributeValue::S(item.item_id.clone()));
        record.insert("name".to_string(), AttributeValue::S(item.name.clone()));
        if let Some(description) = &item.description {
            record.insert("description".to_string(), AttributeValue::S(description.clone()));
        }
        record.insert("price".to_string(), AttributeValue::N(item.price.to_string()));
        if let Some(category) = &item.category {
            record.insert("category".to_string(), AttributeValue::S(category.clone()));
        }
        record.insert("availability".to_string(), AttributeValue::Bool(item.availability));
        if !item.allergens.is_empty() {
            record.insert("allergens".to_string(), AttributeValue::Ss(item.allergens.clone()));
        }
        record
    }

    fn unmarshal(record: &Item) -> Result<MenuItem, ServiceError> {
        Ok(MenuItem {
            restaurant_id: get_string(record, "restaurant_id")?,
            item_id: get_string(record, "item_id")?,
            name: get_string(record, "name")?,
            description: get_optional_string(record, "description"),
            price: get_number(record, "price")?,
            category: get_optional_string(record, "category"),
            availability: get_bool(record, "availability").unwrap_or(true),
            allergens: get_optional_string_list(record, "allergens").unwrap_or_default(),
        })
    }
}

#[async_trait]
impl MenuItemRepository for DynamoMenuItemRepository {
    async fn create(&self, item: MenuItem) -> Result<MenuItem, ServiceError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(Self::marshal(&item)))
            .send()
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        Ok(item)
    }

    async fn get(&self, restaurant_id: &str, item_id: &str) -> Result<Option<MenuItem>, ServiceError> {
        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("restaurant_id", AttributeValue::S(restaurant_id.to_string()))
            .key("item_id", AttributeValue::S(item_id.to_string()))
            .send()
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;

        match response.item {
            Some(record) => Ok(Some(Self::unmarshal(&record)?)),
            None => Ok(None),
        }
    }

    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<MenuItem>, ServiceError> {
        let response = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("restaurant_id = :rid")
            .expression_attribute_values(":rid", AttributeValue::S(restaurant_id.to_string()))
            .send()
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;

        let mut items = Vec::new();
        for record in response.items.unwrap_or_default() {
            items.push(Self::unmarshal(&record)?);
        }
        Ok(items)
    }

    async fn update(&self, item: MenuItem) -> Result<Option<MenuItem>, ServiceError> {
        // Existence check first; put_item overwrites.
        if self.get(&item.restaurant_id, &item.item_id).await?.is_none() {
            return Ok(None);
        }
        let item = self.create(item).await?;
        Ok(Some(item))
    }

    async fn delete(
        &self,
        restaurant_id: &str,
        item_id: &str,
    ) -> Result<Option<MenuItem>, ServiceError> {
        // ALL_OLD hands back the removed record, so existence and payload
        // come from the one delete call.
        let response = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("restaurant_id", AttributeValue::S(restaurant_id.to_string()))
            .key("item_id", AttributeValue::S(item_id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;

        match response.attributes {
            Some(record) => Ok(Some(Self::unmarshal(&record)?)),
            None => Ok(None),
        }
    }
}

pub struct DynamoCategoryRepository {
    client: Client,
    table_name: String,
}

impl DynamoCategoryRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self { client, table_name: table_name.into() }
    }

    fn marshal(category: &Category) -> Item {
        let mut record = HashMap::new();
        record.insert(
            "restaurant_id".to_string(),
            AttributeValue::S(category.restaurant_id.clone()),
        );
        record.insert("category_id".to_string(), AttributeValue::S(category.category_id.clone()));
        record.insert("name".to_string(), AttributeValue::S(category.name.clone()));
        record.insert(
            "display_order".to_string(),
            AttributeValue::N(category.display_order.to_string()),
        );
        if let Some(parent) = &category.parent_category {
            record.insert("parent_category".to_string(), AttributeValue::S(parent.clone()));
        }
        record
    }

    fn unmarshal(record: &Item) -> Result<Category, ServiceError> {
        Ok(Category {
            restaurant_id: get_string(record, "restaurant_id")?,
            category_id: get_string(record, "category_id")?,
            name: get_string(record, "name")?,
            display_order: get_number(record, "display_order")? as i64,
            parent_category: get_optional_string(record, "parent_category"),
        })
    }
}

#[async_trait]
impl CategoryRepository for DynamoCategoryRepository {
    async fn create(&self, category: Category) -> Result<Category, ServiceError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(Self::marshal(&category)))
            .send()
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        Ok(category)
    }

    async fn get(
        &self,
        restaurant_id: &str,
        category_id: &str,
    ) -> Result<Option<Category>, ServiceError> {
        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("restaurant_id", AttributeValue::S(restaurant_id.to_string()))
            .key("category_id", AttributeValue::S(category_id.to_string()))
            .send()
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;

        match response.item {
            Some(record) => Ok(Some(Self::unmarshal(&record)?)),
            None => Ok(None),
        }
    }

    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<Category>, ServiceError> {
        let response = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("restaurant_id = :rid")
            .expression_attribute_values(":rid", AttributeValue::S(restaurant_id.to_string()))
            .send()
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;

        let mut categories = Vec::new();
        for record in response.items.unwrap_or_default() {
            categories.push(Self::unmarshal(&record)?);
        }
        categories.sort_by_key(|c| c.display_order);
        Ok(categories)
    }
}

fn get_string(record: &Item, key: &str) -> Result<String, ServiceError> {
    record
        .get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| ServiceError::Store(format!("missing or invalid field: {key}")))
}

fn get_optional_string(record: &Item, key: &str) -> Option<String> {
    record.get(key).and_then(|v| v.as_s().ok()).cloned()
}

fn get_optional_string_list(record: &Item, key: &str) -> Option<Vec<String>> {
    record.get(key).and_then(|v| v.as_ss().ok()).cloned()
}

fn get_number(record: &Item, key: &str) -> Result<f64, ServiceError> {
    record
        .get(key)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse::<f64>().ok())
        .ok_or_else(|| ServiceError::Store(format!("missing or invalid number field: {key}")))
}

fn get_bool(record: &Item, key: &str) -> Option<bool> {
    record.get(key).and_then(|v| v.as_bool().ok()).copied()
}
