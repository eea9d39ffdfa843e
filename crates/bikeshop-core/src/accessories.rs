use serde::{Deserialize, Serialize};

use crate::price::Price;

/// An accessory or replacement part from `GET /accessories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessory {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub price: Price,
    /// Bike model names this accessory fits, e.g. `"C11 PRO"`.
    #[serde(default)]
    pub compatibility: Vec<String>,
    #[serde(default)]
    pub specifications: AccessorySpecifications,
    #[serde(default)]
    pub stock_status: StockStatus,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_replacement_part: bool,
    #[serde(default = "default_listed")]
    pub is_listed: bool,
}

fn default_listed() -> bool {
    true
}

impl Accessory {
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock_status.in_stock
    }

    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessorySpecifications {
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub waterproof_rating: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockStatus {
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub quantity: u32,
}

impl Default for StockStatus {
    fn default() -> Self {
        Self {
            in_stock: true,
            quantity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_listing_flag_defaults_to_listed() {
        let json = serde_json::json!({
            "_id": "a1",
            "name": "Rear Rack",
            "category": "Extend Accessories",
            "subCategory": "Rear Rack",
            "price": {"current": 59.99, "currency": "USD"},
            "compatibility": ["C11", "T2"],
            "stockStatus": {"inStock": false, "quantity": 0}
        });
        let accessory: Accessory = serde_json::from_value(json).unwrap();

        assert!(accessory.is_listed);
        assert!(!accessory.is_in_stock());
        assert_eq!(accessory.sub_category.as_deref(), Some("Rear Rack"));
        assert_eq!(accessory.compatibility, vec!["C11", "T2"]);
    }
}
