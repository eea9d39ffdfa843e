//! Product and accessory listings: filter state, query composition, and the
//! fetches behind the catalog pages.

pub mod filters;
pub mod price_range;
pub mod query;
pub mod service;

pub use filters::{
    AccessoryFacet, AccessoryFilters, Availability, Filters, ProductFacet, ProductFilters, Stock,
    UnknownFacet,
};
pub use price_range::PriceRange;
pub use query::ListingQuery;
pub use service::{CatalogService, RELATED_LIMIT};
