//! Paged admin inventory with server-side search.

use std::sync::Arc;

use bikeshop_client::{ApiClient, FormPayload};
use bikeshop_core::{Accessory, Listing, QueryParams};

use super::debounce::Debouncer;
use super::AdminEntity;
use crate::error::ActionError;

#[derive(Debug)]
pub struct AdminInventory<E> {
    client: Arc<ApiClient>,
    page: u32,
    limit: u32,
    search: String,
    listing: Listing<E>,
    error: Option<String>,
}

impl<E: AdminEntity> AdminInventory<E> {
    #[must_use]
    pub fn new(client: Arc<ApiClient>, limit: u32) -> Self {
        Self {
            client,
            page: 1,
            limit: limit.max(1),
            search: String::new(),
            listing: Listing::empty(1),
            error: None,
        }
    }

    /// Sets the search term used by the next load, without fetching.
    #[must_use]
    pub fn with_search(mut self, term: &str) -> Self {
        self.search = term.to_owned();
        self
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn listing(&self) -> &Listing<E> {
        &self.listing
    }

    /// Message from the last failed load or action, cleared on success.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("page", self.page);
        params.push("limit", self.limit);
        let term = self.search.trim();
        if !term.is_empty() {
            params.push("search", term);
        }
        params
    }

    /// Loads the current page. A failure keeps the rows already shown.
    pub async fn refresh(&mut self) {
        let params = self.params();
        match E::list(&self.client, &params).await {
            Ok(listing) => {
                self.listing = listing;
                self.error = None;
            }
            Err(e) => {
                let plural = E::schema().plural;
                tracing::error!(error = %e, "error fetching admin {plural}");
                self.error = Some(e.user_message(&format!("Failed to load {plural}")));
            }
        }
    }

    pub async fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
        self.refresh().await;
    }

    /// Searches from page 1.
    pub async fn apply_search(&mut self, term: &str) {
        self.search = term.to_owned();
        self.page = 1;
        self.refresh().await;
    }

    /// Waits for the next settled search term and applies it. Returns
    /// `false` once the input side is gone.
    pub async fn next_search(&mut self, terms: &mut Debouncer<String>) -> bool {
        match terms.settled().await {
            Some(term) => {
                self.apply_search(&term).await;
                true
            }
            None => false,
        }
    }

    /// Deletes a row, then reloads. Removing the only row of a page past
    /// the first moves back one page.
    ///
    /// # Errors
    ///
    /// Returns the server's message or `"Failed to delete <noun>"`.
    pub async fn delete(&mut self, id: &str) -> Result<(), ActionError> {
        let noun = E::schema().noun;
        if let Err(e) = E::delete(&self.client, id).await {
            let err = ActionError::from_client(&e, &format!("Failed to delete {noun}"));
            self.error = Some(err.message.clone());
            return Err(err);
        }
        tracing::info!(id, "deleted {noun}");
        if self.listing.items.len() == 1 && self.page > 1 {
            self.page -= 1;
        }
        self.refresh().await;
        Ok(())
    }
}

impl AdminInventory<Accessory> {
    /// Flips an accessory between listed and unlisted, sending only the
    /// `isListed` field.
    ///
    /// # Errors
    ///
    /// Returns the server's message or `"Failed to update accessory status"`.
    /// An id not on the current page is fetched to read its current state.
    pub async fn toggle_listing(&mut self, id: &str) -> Result<bool, ActionError> {
        let on_page = self
            .listing
            .items
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.is_listed);
        let listed = match on_page {
            Some(listed) => listed,
            None => match self.client.get_accessory(id).await {
                Ok(accessory) => accessory.is_listed,
                Err(e) => {
                    let err = ActionError::from_client(&e, "Failed to update accessory status");
                    self.error = Some(err.message.clone());
                    return Err(err);
                }
            },
        };

        let mut payload = FormPayload::new();
        payload.text("isListed", !listed);
        match self.client.update_accessory(id, payload).await {
            Ok(updated) => {
                self.refresh().await;
                Ok(updated.is_listed)
            }
            Err(e) => {
                let err = ActionError::from_client(&e, "Failed to update accessory status");
                self.error = Some(err.message.clone());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshop_client::MemoryTokenStore;
    use bikeshop_core::Product;

    fn inventory() -> AdminInventory<Product> {
        let client = ApiClient::with_base_url(
            "http://127.0.0.1:9/api",
            Arc::new(MemoryTokenStore::new()),
        )
        .unwrap();
        AdminInventory::new(Arc::new(client), 6)
    }

    #[test]
    fn blank_search_is_not_sent() {
        let mut inv = inventory();
        inv.search = "   ".to_owned();
        let params = inv.params();
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("limit"), Some("6"));
        assert!(!params.contains("search"));

        inv.search = " titan ".to_owned();
        assert_eq!(inv.params().get("search"), Some("titan"));
    }

    #[tokio::test]
    async fn failed_load_keeps_rows_and_reports() {
        let mut inv = inventory();
        inv.refresh().await;
        assert_eq!(inv.error(), Some("Failed to load products"));
        assert!(inv.listing().items.is_empty());
    }
}
