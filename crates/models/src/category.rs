use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A display category of one restaurant's menu. Distinct from the free-form
/// `category` tag on `MenuItem`: categories organize menus for presentation
/// and may form a hierarchy via `parent_category`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub restaurant_id: String,
    pub category_id: String,
    pub name: String,
    /// Sort position when listing; lower numbers first.
    pub display_order: i64,
    #[serde(default)]
    pub parent_category: Option<String>,
}

impl Category {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.restaurant_id.trim().is_empty() {
            return Err(ModelError::Validation("restaurant_id required".into()));
        }
        if self.category_id.trim().is_empty() {
            return Err(ModelError::Validation("category_id required".into()));
        }
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("name required".into()));
        }
        if self.display_order < 0 {
            return Err(ModelError::Validation("display_order must be >= 0".into()));
        }
        Ok(())
    }
}
