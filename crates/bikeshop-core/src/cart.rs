use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::price::Price;

/// Server-side cart snapshot. The client never edits it in place; every
/// mutation response replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Snapshot of the product; `None` if it was deleted after being added.
    #[serde(default)]
    pub product: Option<CartProduct>,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartProduct {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub price: Price,
}

impl CartItem {
    /// Unit price times quantity; zero when the product snapshot is missing.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product
            .as_ref()
            .map_or(Decimal::ZERO, |p| p.price.current * Decimal::from(self.quantity))
    }
}

impl Cart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item quantities, saturating at `u32::MAX`.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Sum of `price.current * quantity` over all items.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Currency of the first priced item, `"USD"` for an empty cart.
    #[must_use]
    pub fn currency(&self) -> &str {
        self.items
            .iter()
            .find_map(|item| item.product.as_ref())
            .map_or("USD", |p| p.price.currency.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_from(json: serde_json::Value) -> Cart {
        serde_json::from_value(json).expect("cart fixture should deserialize")
    }

    #[test]
    fn item_count_sums_quantities() {
        let cart = cart_from(serde_json::json!({
            "items": [
                {"_id": "i1", "product": {"_id": "p1", "name": "A", "price": {"current": 10}}, "quantity": 2},
                {"_id": "i2", "product": {"_id": "p2", "name": "B", "price": {"current": 5}}, "quantity": 3}
            ]
        }));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn item_count_saturates_instead_of_overflowing() {
        let cart = cart_from(serde_json::json!({
            "items": [
                {"_id": "i1", "quantity": u32::MAX},
                {"_id": "i2", "quantity": 2}
            ]
        }));
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn total_multiplies_current_price_by_quantity() {
        let cart = cart_from(serde_json::json!({
            "items": [
                {"_id": "i1", "product": {"_id": "p1", "name": "A", "price": {"current": 10}}, "quantity": 2},
                {"_id": "i2", "product": {"_id": "p2", "name": "B", "price": {"current": 5}}, "quantity": 1}
            ]
        }));
        assert_eq!(cart.total(), Decimal::from(25));
    }

    #[test]
    fn total_accepts_bare_number_prices_and_skips_missing_products() {
        let cart = cart_from(serde_json::json!({
            "items": [
                {"_id": "i1", "product": {"_id": "p1", "name": "A", "price": 12.5}, "quantity": 2},
                {"_id": "i2", "product": null, "quantity": 4}
            ]
        }));
        assert_eq!(cart.total(), Decimal::from(25));
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn empty_cart_has_zero_count_and_total() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.currency(), "USD");
    }
}
