//! `/cart` endpoints. Every mutation answers with the full cart snapshot.

use bikeshop_core::Cart;
use reqwest::Method;
use serde::Serialize;

use crate::client::{entity_path, parse_body, unwrap_entity, ApiClient};
use crate::error::ClientError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToCart<'a> {
    product_id: &'a str,
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct QuantityUpdate {
    quantity: u32,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] (401 when not signed in), or transport/deserialize errors.
    pub async fn get_cart(&self) -> Result<Cart, ClientError> {
        let value: serde_json::Value = self.get_json("cart", None).await?;
        unwrap_entity(value, "cart", "cart")
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server refuses the item.
    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<Cart, ClientError> {
        let body = AddToCart {
            product_id,
            quantity,
        };
        let value: serde_json::Value = self.send_json(Method::POST, "cart", &body).await?;
        unwrap_entity(value, "cart", "cart")
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the item does not exist or the quantity is refused.
    pub async fn update_cart_item(&self, item_id: &str, quantity: u32) -> Result<Cart, ClientError> {
        let path = entity_path("cart", item_id)?;
        let value: serde_json::Value = self
            .send_json(Method::PUT, &path, &QuantityUpdate { quantity })
            .await?;
        unwrap_entity(value, "cart", &path)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the item does not exist.
    pub async fn remove_from_cart(&self, item_id: &str) -> Result<Cart, ClientError> {
        let path = entity_path("cart", item_id)?;
        let body = self.send_empty(Method::DELETE, &path).await?;
        unwrap_entity(parse_body(&body, &path)?, "cart", &path)
    }

    /// Empties the cart. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] or [`ClientError::Http`] on failure.
    pub async fn clear_cart(&self) -> Result<(), ClientError> {
        self.send_empty(Method::DELETE, "cart").await?;
        Ok(())
    }
}
