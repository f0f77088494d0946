use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A menu item of one restaurant. `(restaurant_id, item_id)` is the
/// storage key: `restaurant_id` partitions, `item_id` sorts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub restaurant_id: String,
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price in the restaurant's currency. Must be finite and >= 0.
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_availability")]
    pub availability: bool,
    #[serde(default)]
    pub allergens: Vec<String>,
}

fn default_availability() -> bool {
    true
}

impl MenuItem {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.restaurant_id.trim().is_empty() {
            return Err(ModelError::Validation("restaurant_id required".into()));
        }
        if self.item_id.trim().is_empty() {
            return Err(ModelError::Validation("item_id required".into()));
        }
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("name required".into()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ModelError::Validation("price must be >= 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pizza() -> MenuItem {
        MenuItem {
            restaurant_id: "rest_123".into(),
            item_id: "item_456".into(),
            name: "Margherita Pizza".into(),
            description: Some("Classic tomato sauce, mozzarella and fresh basil".into()),
            price: 12.99,
            category: Some("pizza".into()),
            availability: true,
            allergens: vec!["dairy".into(), "gluten".into()],
        }
    }

    #[test]
    fn valid_item_passes() {
        assert!(pizza().validate().is_ok());
    }

    #[test]
    fn negative_price_rejected() {
        let mut item = pizza();
        item.price = -0.01;
        assert!(item.validate().is_err());
    }

    #[test]
    fn nan_price_rejected() {
        let mut item = pizza();
        item.price = f64::NAN;
        assert!(item.validate().is_err());
    }

    #[test]
    fn zero_price_allowed() {
        let mut item = pizza();
        item.price = 0.0;
        assert!(item.validate().is_ok());
    }

    #[test]
    fn blank_name_rejected() {
        let mut item = pizza();
        item.name = "  ".into();
        assert!(item.validate().is_err());
    }

    #[test]
    fn optional_fields_default_on_deserialize() {
        let item: MenuItem = serde_json::from_str(
            r#"{"restaurant_id":"rest_1","item_id":"item_1","name":"Water","price":1.5}"#,
        )
        .unwrap();
        assert!(item.availability);
        assert!(item.allergens.is_empty());
        assert!(item.description.is_none());
        assert!(item.category.is_none());
    }
}
