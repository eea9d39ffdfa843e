//! Admin console state: entity forms, inventory lists, and search debounce.
//!
//! Products and accessories share one implementation; what differs between
//! them lives in [`AdminEntity`].

pub mod debounce;
pub mod form;
pub mod images;
pub mod inventory;
pub mod schema;

use std::future::Future;

use bikeshop_client::{ApiClient, ClientError, FormPayload};
use bikeshop_core::{Accessory, Listing, Product, QueryParams};
use serde::Serialize;

pub use debounce::{debounced, Debouncer, SearchInput};
pub use form::{ColorDraft, EntityForm, FieldValue, FormMode, VariantDraft};
pub use images::{is_accepted_image, mime_from_extension, ImageSet, PendingImage};
pub use inventory::AdminInventory;
pub use schema::{FieldKind, FieldSpec, FormSchema, RecordKind, Rule};

/// An entity the admin console can list, create, edit, and delete.
pub trait AdminEntity: Serialize + Clone + Send + Sync + 'static {
    fn schema() -> &'static FormSchema;

    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn image_urls(&self) -> &[String];

    fn variant_drafts(&self) -> Vec<VariantDraft> {
        Vec::new()
    }

    fn color_drafts(&self) -> Vec<ColorDraft> {
        Vec::new()
    }

    fn list(
        client: &ApiClient,
        query: &QueryParams,
    ) -> impl Future<Output = Result<Listing<Self>, ClientError>> + Send;

    /// Loads one entity to seed an edit form.
    fn fetch(client: &ApiClient, id: &str) -> impl Future<Output = Result<Self, ClientError>> + Send;

    fn create(
        client: &ApiClient,
        payload: FormPayload,
    ) -> impl Future<Output = Result<Self, ClientError>> + Send;

    fn update(
        client: &ApiClient,
        id: &str,
        payload: FormPayload,
    ) -> impl Future<Output = Result<Self, ClientError>> + Send;

    fn delete(client: &ApiClient, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;
}

impl AdminEntity for Product {
    fn schema() -> &'static FormSchema {
        &schema::PRODUCT_SCHEMA
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn image_urls(&self) -> &[String] {
        &self.images
    }

    fn variant_drafts(&self) -> Vec<VariantDraft> {
        self.variants
            .iter()
            .map(|v| VariantDraft {
                variant_id: v.variant_id.clone(),
                name: v.name.clone(),
                price: v.price,
            })
            .collect()
    }

    fn color_drafts(&self) -> Vec<ColorDraft> {
        self.colors
            .iter()
            .map(|c| ColorDraft {
                name: c.name.clone(),
                quantity: c.quantity,
            })
            .collect()
    }

    fn list(
        client: &ApiClient,
        query: &QueryParams,
    ) -> impl Future<Output = Result<Listing<Self>, ClientError>> + Send {
        client.list_products(query)
    }

    fn fetch(client: &ApiClient, id: &str) -> impl Future<Output = Result<Self, ClientError>> + Send {
        client.get_product(id)
    }

    fn create(
        client: &ApiClient,
        payload: FormPayload,
    ) -> impl Future<Output = Result<Self, ClientError>> + Send {
        client.create_product(payload)
    }

    fn update(
        client: &ApiClient,
        id: &str,
        payload: FormPayload,
    ) -> impl Future<Output = Result<Self, ClientError>> + Send {
        client.update_product(id, payload)
    }

    fn delete(client: &ApiClient, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send {
        client.delete_product(id)
    }
}

impl AdminEntity for Accessory {
    fn schema() -> &'static FormSchema {
        &schema::ACCESSORY_SCHEMA
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn image_urls(&self) -> &[String] {
        &self.images
    }

    fn list(
        client: &ApiClient,
        query: &QueryParams,
    ) -> impl Future<Output = Result<Listing<Self>, ClientError>> + Send {
        client.list_accessories(query)
    }

    fn fetch(client: &ApiClient, id: &str) -> impl Future<Output = Result<Self, ClientError>> + Send {
        client.get_accessory(id)
    }

    fn create(
        client: &ApiClient,
        payload: FormPayload,
    ) -> impl Future<Output = Result<Self, ClientError>> + Send {
        client.create_accessory(payload)
    }

    fn update(
        client: &ApiClient,
        id: &str,
        payload: FormPayload,
    ) -> impl Future<Output = Result<Self, ClientError>> + Send {
        client.update_accessory(id, payload)
    }

    fn delete(client: &ApiClient, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send {
        client.delete_accessory(id)
    }
}
