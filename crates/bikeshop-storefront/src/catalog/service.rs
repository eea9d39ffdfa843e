use std::sync::Arc;

use bikeshop_client::ApiClient;
use bikeshop_core::{Accessory, Listing, Product, QueryParams};

use super::filters::{AccessoryFilters, ProductFilters};
use super::query::ListingQuery;
use crate::error::ActionError;

/// How many related products the detail view shows.
pub const RELATED_LIMIT: usize = 4;

/// Read side of the catalog. Listing failures never reach the caller: they
/// are logged and shown as an empty page.
#[derive(Debug, Clone)]
pub struct CatalogService {
    client: Arc<ApiClient>,
}

impl CatalogService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn products(&self, query: &ListingQuery<ProductFilters>) -> Listing<Product> {
        let params = query.to_params();
        match self.client.list_products(&params).await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::error!(error = %e, "error fetching products");
                Listing::empty(query.page())
            }
        }
    }

    pub async fn accessories(&self, query: &ListingQuery<AccessoryFilters>) -> Listing<Accessory> {
        let params = query.to_params();
        match self.client.list_accessories(&params).await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::error!(error = %e, "error fetching accessories");
                Listing::empty(query.page())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `"Product not found"` when the product cannot be loaded.
    pub async fn product(&self, id: &str) -> Result<Product, ActionError> {
        self.client.get_product(id).await.map_err(|e| {
            tracing::error!(id, error = %e, "error loading product");
            ActionError::from_client(&e, "Product not found")
        })
    }

    /// # Errors
    ///
    /// Returns `"Accessory not found"` when the accessory cannot be loaded.
    pub async fn accessory(&self, id: &str) -> Result<Accessory, ActionError> {
        self.client.get_accessory(id).await.map_err(|e| {
            tracing::error!(id, error = %e, "error loading accessory");
            ActionError::from_client(&e, "Accessory not found")
        })
    }

    /// Up to [`RELATED_LIMIT`] products in the same category, excluding
    /// `product` itself. Empty when the product has no category or the
    /// fetch fails.
    pub async fn related_products(&self, product: &Product) -> Vec<Product> {
        let Some(category) = product.category.as_deref() else {
            return Vec::new();
        };

        let mut params = QueryParams::new();
        params.push("category", category);
        match self.client.list_products(&params).await {
            Ok(listing) => listing
                .items
                .into_iter()
                .filter(|p| p.id != product.id)
                .take(RELATED_LIMIT)
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "error loading related products");
                Vec::new()
            }
        }
    }
}
