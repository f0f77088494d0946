use std::sync::Arc;

use models::Category;
use tracing::{instrument, warn};

use crate::errors::ServiceError;
use crate::events::{ChangeAction, ChangeEvent, EventPublisher};
use crate::repositories::CategoryRepository;

/// Validation and orchestration for menu categories. A `parent_category`
/// reference must resolve to an existing category of the same restaurant;
/// cycle detection is deliberately out of scope.
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
    events: Arc<dyn EventPublisher>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>, events: Arc<dyn EventPublisher>) -> Self {
        Self { repo, events }
    }

    /// Categories of one restaurant, sorted ascending by display order.
    #[instrument(skip(self))]
    pub async fn list(&self, restaurant_id: &str) -> Result<Vec<Category>, ServiceError> {
        self.repo.list_by_restaurant(restaurant_id).await
    }

    #[instrument(skip(self, category), fields(restaurant_id = %category.restaurant_id, category_id = %category.category_id))]
    pub async fn create(&self, category: Category) -> Result<Category, ServiceError> {
        category.validate()?;
        if let Some(parent_id) = &category.parent_category {
            let parent = self.repo.get(&category.restaurant_id, parent_id).await?;
            if parent.is_none() {
                return Err(ServiceError::Validation(format!(
                    "parent category {parent_id} not found for restaurant {}",
                    category.restaurant_id
                )));
            }
        }
        let created = self.repo.create(category).await?;
        self.emit(ChangeEvent::category(ChangeAction::Created, &created)).await;
        Ok(created)
    }

    async fn emit(&self, event: ChangeEvent) {
        if let Err(e) = self.events.publish(event).await {
            warn!(error = %e, "change event publication failed");
        }
    }
}
