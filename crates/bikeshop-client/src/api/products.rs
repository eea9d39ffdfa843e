//! `GET /products` and `GET /products/:id`.

use bikeshop_core::{Listing, Product, QueryParams};

use super::ListingBody;
use crate::client::{entity_path, unwrap_entity, ApiClient};
use crate::error::ClientError;

impl ApiClient {
    /// Fetches one page of products matching `query`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not a product listing.
    pub async fn list_products(&self, query: &QueryParams) -> Result<Listing<Product>, ClientError> {
        let body: ListingBody<Product> = self.get_json("products", Some(query)).await?;
        Ok(body.into_listing(Some(query)))
    }

    /// Fetches a single product by ID.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status (404 for unknown IDs).
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not a product.
    pub async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        let path = entity_path("products", id)?;
        let value: serde_json::Value = self.get_json(&path, None).await?;
        unwrap_entity(value, "product", &path)
    }
}
