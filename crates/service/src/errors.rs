use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn item_not_found(restaurant_id: &str, item_id: &str) -> Self {
        Self::NotFound(format!("item {item_id} not found for restaurant {restaurant_id}"))
    }
}
