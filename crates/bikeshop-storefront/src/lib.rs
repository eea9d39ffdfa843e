//! Client-side state for the bike shop: session and cart stores, catalog
//! filter state, and the admin console's forms and inventory lists.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod session;

pub use admin::{
    AdminEntity, AdminInventory, Debouncer, EntityForm, FieldKind, FieldSpec, FieldValue,
    FormMode, FormSchema, ImageSet, PendingImage, Rule, SearchInput,
};
pub use cart::{CartState, CartStore};
pub use catalog::{
    AccessoryFacet, AccessoryFilters, Availability, CatalogService, Filters, ListingQuery,
    PriceRange, ProductFacet, ProductFilters, Stock,
};
pub use error::{ActionError, FormError};
pub use session::SessionStore;
