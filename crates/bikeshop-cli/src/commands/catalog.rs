use clap::{Args, Subcommand};

use bikeshop_core::SortKey;
use bikeshop_storefront::catalog::UnknownFacet;
use bikeshop_storefront::{
    AccessoryFacet, AccessoryFilters, Filters, ListingQuery, ProductFacet, ProductFilters, Stock,
};

use super::{parse_key_val, App};
use crate::views;

/// Sub-commands available under `products`.
#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// List bikes with optional filters
    List {
        /// Single category, e.g. "Electric Bike"
        #[arg(long)]
        category: Option<String>,
        /// Facet selection as facet=value, e.g. ridingStyles=Commuter (repeatable)
        #[arg(long = "filter", value_parser = parse_key_val)]
        filters: Vec<(String, String)>,
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Show one bike with related products
    Show { id: String },
}

/// Sub-commands available under `accessories`.
#[derive(Debug, Subcommand)]
pub enum AccessoryCommands {
    /// List accessories with optional filters
    List {
        /// Facet selection as facet=value, e.g. compatibility=T2 (repeatable)
        #[arg(long = "filter", value_parser = parse_key_val)]
        filters: Vec<(String, String)>,
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Show one accessory
    Show { id: String },
}

/// Availability, price, paging, and sort flags shared by both listings.
#[derive(Debug, Args)]
pub struct ListingArgs {
    /// Only items in stock
    #[arg(long)]
    pub in_stock: bool,
    /// Only items out of stock
    #[arg(long)]
    pub out_of_stock: bool,
    /// Lower price bound, as typed
    #[arg(long)]
    pub price_min: Option<String>,
    /// Upper price bound, as typed
    #[arg(long)]
    pub price_max: Option<String>,
    #[arg(long, default_value = "1")]
    pub page: u32,
    /// featured, priceLow or priceHigh
    #[arg(long, default_value = "featured")]
    pub sort: SortKey,
}

impl ListingArgs {
    fn apply<F: Filters>(&self, query: &mut ListingQuery<F>) {
        if self.in_stock {
            query.toggle_availability(|a| a.toggle(Stock::InStock));
        }
        if self.out_of_stock {
            query.toggle_availability(|a| a.toggle(Stock::OutOfStock));
        }
        if let Some(raw) = &self.price_min {
            query.set_price_min(raw);
        }
        if let Some(raw) = &self.price_max {
            query.set_price_max(raw);
        }
        query.set_sort(self.sort);
        query.set_page(self.page);
    }
}

/// Builds the bike listing query from command-line flags.
///
/// # Errors
///
/// Returns an error for an unknown facet name.
pub(crate) fn product_query(
    limit: u32,
    category: Option<&str>,
    filters: &[(String, String)],
    listing: &ListingArgs,
) -> Result<ListingQuery<ProductFilters>, UnknownFacet> {
    let mut query = ListingQuery::<ProductFilters>::new(limit);
    query.update_filters(|f| f.set_category(category));
    for (facet, value) in filters {
        query.toggle(facet.parse::<ProductFacet>()?, value);
    }
    listing.apply(&mut query);
    Ok(query)
}

/// Builds the accessory listing query from command-line flags.
///
/// # Errors
///
/// Returns an error for an unknown facet name.
pub(crate) fn accessory_query(
    limit: u32,
    filters: &[(String, String)],
    listing: &ListingArgs,
) -> Result<ListingQuery<AccessoryFilters>, UnknownFacet> {
    let mut query = ListingQuery::<AccessoryFilters>::new(limit);
    for (facet, value) in filters {
        query.toggle(facet.parse::<AccessoryFacet>()?, value);
    }
    listing.apply(&mut query);
    Ok(query)
}

pub(crate) async fn run_products(app: &App, command: ProductCommands) -> anyhow::Result<()> {
    let catalog = app.catalog();
    match command {
        ProductCommands::List {
            category,
            filters,
            listing,
        } => {
            let query = product_query(
                app.config.products_page_size,
                category.as_deref(),
                &filters,
                &listing,
            )?;
            let page = catalog.products(&query).await;
            println!("{}", views::product_table(&page, query.active_filters()));
        }
        ProductCommands::Show { id } => {
            let product = catalog.product(&id).await?;
            let related = catalog.related_products(&product).await;
            println!("{}", views::product_detail(&product, &related));
        }
    }
    Ok(())
}

pub(crate) async fn run_accessories(app: &App, command: AccessoryCommands) -> anyhow::Result<()> {
    let catalog = app.catalog();
    match command {
        AccessoryCommands::List { filters, listing } => {
            let query = accessory_query(app.config.accessories_page_size, &filters, &listing)?;
            let page = catalog.accessories(&query).await;
            println!("{}", views::accessory_table(&page, query.active_filters()));
        }
        AccessoryCommands::Show { id } => {
            let accessory = catalog.accessory(&id).await?;
            println!("{}", views::accessory_detail(&accessory));
        }
    }
    Ok(())
}
