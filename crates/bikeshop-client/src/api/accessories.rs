//! `GET /accessories` and `GET /accessories/:id`.

use bikeshop_core::{Accessory, Listing, QueryParams};

use super::ListingBody;
use crate::client::{entity_path, unwrap_entity, ApiClient};
use crate::error::ClientError;

impl ApiClient {
    /// Fetches one page of accessories matching `query`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not an accessory listing.
    pub async fn list_accessories(
        &self,
        query: &QueryParams,
    ) -> Result<Listing<Accessory>, ClientError> {
        let body: ListingBody<Accessory> = self.get_json("accessories", Some(query)).await?;
        Ok(body.into_listing(Some(query)))
    }

    /// Fetches a single accessory by ID.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_product`].
    pub async fn get_accessory(&self, id: &str) -> Result<Accessory, ClientError> {
        let path = entity_path("accessories", id)?;
        let value: serde_json::Value = self.get_json(&path, None).await?;
        unwrap_entity(value, "accessory", &path)
    }
}
