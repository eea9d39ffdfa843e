//! Typed endpoint groups, one module per API resource.

pub mod accessories;
pub mod admin;
pub mod cart;
pub mod products;
pub mod users;

use bikeshop_core::{Listing, QueryParams};
use serde::Deserialize;

/// Listing responses come as `{products|accessories, total, totalPages}`;
/// some endpoints return a bare array instead.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingBody<T> {
    Envelope(ListingEnvelope<T>),
    Bare(Vec<T>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingEnvelope<T> {
    #[serde(default = "Vec::new", alias = "products", alias = "accessories")]
    items: Vec<T>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    total_pages: Option<u32>,
    #[serde(default)]
    page: Option<u32>,
}

impl<T> ListingBody<T> {
    fn into_listing(self, query: Option<&QueryParams>) -> Listing<T> {
        let requested_page = query.map_or(1, QueryParams::page);
        let limit = query.and_then(QueryParams::limit);
        match self {
            ListingBody::Envelope(envelope) => {
                let total = envelope.total.unwrap_or(envelope.items.len() as u64);
                let limit = limit.unwrap_or_else(|| u32::try_from(envelope.items.len()).unwrap_or(u32::MAX));
                Listing::new(
                    envelope.items,
                    total,
                    envelope.page.unwrap_or(requested_page),
                    limit,
                    envelope.total_pages,
                )
            }
            ListingBody::Bare(items) => {
                let total = items.len() as u64;
                Listing::new(items, total, requested_page, limit.unwrap_or(0), None)
            }
        }
    }
}
