//! Admin create/update/delete calls. Writes use multipart payloads built by
//! the admin forms; deletes carry no body.

use bikeshop_core::{Accessory, Product};
use reqwest::Method;

use crate::client::{entity_path, parse_body, unwrap_entity, ApiClient};
use crate::error::ClientError;
use crate::payload::FormPayload;

impl ApiClient {
    /// `POST /products`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server rejects the payload (403 for non-admins).
    pub async fn create_product(&self, payload: FormPayload) -> Result<Product, ClientError> {
        let body = self
            .send_multipart(Method::POST, "products", payload)
            .await?;
        unwrap_entity(parse_body(&body, "products")?, "product", "products")
    }

    /// `PUT /products/:id` with the full draft.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server rejects the payload.
    pub async fn update_product(&self, id: &str, payload: FormPayload) -> Result<Product, ClientError> {
        let path = entity_path("products", id)?;
        let body = self.send_multipart(Method::PUT, &path, payload).await?;
        unwrap_entity(parse_body(&body, &path)?, "product", &path)
    }

    /// `DELETE /products/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the product does not exist or the caller is not an admin.
    pub async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
        self.send_empty(Method::DELETE, &entity_path("products", id)?)
            .await?;
        Ok(())
    }

    /// `POST /accessories`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server rejects the payload.
    pub async fn create_accessory(&self, payload: FormPayload) -> Result<Accessory, ClientError> {
        let body = self
            .send_multipart(Method::POST, "accessories", payload)
            .await?;
        unwrap_entity(parse_body(&body, "accessories")?, "accessory", "accessories")
    }

    /// `PUT /accessories/:id`. Also used with a single `isListed` field to
    /// list or unlist an accessory.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server rejects the payload.
    pub async fn update_accessory(
        &self,
        id: &str,
        payload: FormPayload,
    ) -> Result<Accessory, ClientError> {
        let path = entity_path("accessories", id)?;
        let body = self.send_multipart(Method::PUT, &path, payload).await?;
        unwrap_entity(parse_body(&body, &path)?, "accessory", &path)
    }

    /// `DELETE /accessories/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the accessory does not exist or the caller is not an admin.
    pub async fn delete_accessory(&self, id: &str) -> Result<(), ClientError> {
        self.send_empty(Method::DELETE, &entity_path("accessories", id)?)
            .await?;
        Ok(())
    }
}
