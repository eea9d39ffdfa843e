//! Plain-text renderings of the storefront pages.
//!
//! Each view returns a `String` so handlers decide where it goes and tests
//! can assert on the text.

use std::fmt::Write as _;

use bikeshop_core::{format_price, Accessory, Cart, Listing, Price, Product};
use rust_decimal::Decimal;

const NAME_WIDTH: usize = 28;

/// Five-slot star rating: full stars for the whole part, a half star when
/// the fraction is at least .5, and empty stars for the rest.
pub(crate) fn stars(rating: f64) -> String {
    let rating = rating.clamp(0.0, 5.0);
    // Clamped to 0..=5, so the casts cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (full, empty) = (rating.floor() as usize, 5 - rating.ceil() as usize);
    let half = rating.fract() >= 0.5;
    format!(
        "{}{}{}",
        "\u{2605}".repeat(full),
        if half { "\u{00bd}" } else { "" },
        "\u{2606}".repeat(empty)
    )
}

pub(crate) fn stock_label(in_stock: bool) -> &'static str {
    if in_stock {
        "In Stock"
    } else {
        "Out of Stock"
    }
}

/// Current price, followed by the struck original and the saving when on sale.
pub(crate) fn price_line(price: &Price) -> String {
    match price.original {
        Some(original) if price.has_sale() => format!(
            "{} (was {}, save {})",
            price.display(),
            format_price(original, &price.currency),
            format_price(Decimal::from(price.discount_amount()), &price.currency),
        ),
        _ => price.display(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width - 3).collect::<String>())
    } else {
        text.to_owned()
    }
}

/// `"Filters"`, or `"Filters (3)"` when some are active.
pub(crate) fn filter_badge(active: usize) -> String {
    if active == 0 {
        "Filters".to_owned()
    } else {
        format!("Filters ({active})")
    }
}

fn pagination<T>(listing: &Listing<T>) -> String {
    let mut footer = format!(
        "Page {} of {} ({} results)",
        listing.page, listing.total_pages, listing.total
    );
    if listing.has_previous() {
        let _ = write!(footer, "  --page {} for previous", listing.page - 1);
    }
    if listing.has_next() {
        let _ = write!(footer, "  --page {} for next", listing.page + 1);
    }
    footer
}

pub(crate) fn product_table(listing: &Listing<Product>, active_filters: usize) -> String {
    if listing.items.is_empty() {
        return "No products found matching your criteria.".to_owned();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{}", filter_badge(active_filters));
    let _ = writeln!(
        out,
        "{:<26}{:<NAME_WIDTH$}{:<14}{:<14}RATING",
        "ID", "NAME", "PRICE", "STOCK"
    );
    for product in &listing.items {
        let rating = product
            .reviews
            .as_ref()
            .map_or_else(String::new, |r| format!("{} ({})", stars(r.rating_average), r.rating_count));
        let _ = writeln!(
            out,
            "{:<26}{:<NAME_WIDTH$}{:<14}{:<14}{}",
            product.id,
            truncate(&product.name, NAME_WIDTH - 2),
            product.price.display(),
            stock_label(product.is_in_stock()),
            rating
        );
    }
    out.push_str(&pagination(listing));
    out
}

pub(crate) fn accessory_table(listing: &Listing<Accessory>, active_filters: usize) -> String {
    if listing.items.is_empty() {
        return "No accessories found matching your criteria.".to_owned();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{}", filter_badge(active_filters));
    let _ = writeln!(
        out,
        "{:<26}{:<NAME_WIDTH$}{:<14}{:<14}CATEGORY",
        "ID", "NAME", "PRICE", "STOCK"
    );
    for accessory in &listing.items {
        let _ = writeln!(
            out,
            "{:<26}{:<NAME_WIDTH$}{:<14}{:<14}{}",
            accessory.id,
            truncate(&accessory.name, NAME_WIDTH - 2),
            accessory.price.display(),
            stock_label(accessory.is_in_stock()),
            accessory.sub_category.as_deref().unwrap_or("\u{2014}")
        );
    }
    out.push_str(&pagination(listing));
    out
}

/// Compact card used for related products and admin results.
pub(crate) fn product_card(product: &Product) -> String {
    let mut card = format!("{}\n  {}", product.name, price_line(&product.price));
    if let Some(reviews) = &product.reviews {
        let _ = write!(
            card,
            "\n  {} {:.1} ({} reviews)",
            stars(reviews.rating_average),
            reviews.rating_average,
            reviews.rating_count
        );
    }
    let _ = write!(card, "\n  {}", stock_label(product.is_in_stock()));
    card
}

fn list_section(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{title}:");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

pub(crate) fn product_detail(product: &Product, related: &[Product]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.name);
    if let Some(tagline) = &product.tagline {
        let _ = writeln!(out, "{tagline}");
    }
    let _ = writeln!(out, "{}", price_line(&product.price));
    if let Some(reviews) = &product.reviews {
        let _ = writeln!(
            out,
            "{} {:.1} ({} reviews)",
            stars(reviews.rating_average),
            reviews.rating_average,
            reviews.rating_count
        );
    }
    let _ = writeln!(out, "{}", stock_label(product.is_in_stock()));
    if let Some(description) = &product.description {
        let _ = writeln!(out, "\n{description}");
    }

    let specs = &product.specifications;
    let mut rows: Vec<(&str, String)> = Vec::new();
    if let Some(v) = &specs.motor_power {
        rows.push(("Motor", v.clone()));
    }
    if let Some(v) = &specs.battery_capacity {
        rows.push(("Battery", v.clone()));
    }
    if let Some(v) = specs.range_km {
        rows.push(("Range", format!("{v} km")));
    }
    if let Some(v) = specs.max_speed_kmh {
        rows.push(("Top speed", format!("{v} km/h")));
    }
    if let Some(v) = specs.weight_kg {
        rows.push(("Weight", format!("{v} kg")));
    }
    if let Some(v) = &specs.brakes {
        rows.push(("Brakes", v.clone()));
    }
    if let Some(v) = specs.foldable {
        rows.push(("Foldable", if v { "Yes" } else { "No" }.to_owned()));
    }
    if let Some(v) = product.payload {
        rows.push(("Payload", format!("{v} lbs")));
    }
    if !rows.is_empty() {
        let _ = writeln!(out, "\nSpecifications:");
        for (label, value) in rows {
            let _ = writeln!(out, "  {label:<12}{value}");
        }
    }

    list_section(&mut out, "Features", &product.features);
    let variants: Vec<String> = product
        .variants
        .iter()
        .map(|v| format!("{} {}", v.name, format_price(v.price, &product.price.currency)))
        .collect();
    list_section(&mut out, "Variants", &variants);
    let colors: Vec<String> = product
        .colors
        .iter()
        .map(|c| format!("{} ({} left)", c.name, c.quantity))
        .collect();
    list_section(&mut out, "Colors", &colors);
    list_section(&mut out, "Images", &product.images);

    if !related.is_empty() {
        let _ = writeln!(out, "\nYou may also like:");
        for product in related {
            let _ = writeln!(out, "{}", product_card(product));
        }
    }
    out
}

pub(crate) fn accessory_detail(accessory: &Accessory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", accessory.name);
    let _ = writeln!(out, "{}", price_line(&accessory.price));
    let _ = writeln!(out, "{}", stock_label(accessory.is_in_stock()));
    if let Some(description) = &accessory.description {
        let _ = writeln!(out, "\n{description}");
    }
    let specs = &accessory.specifications;
    let rows = [
        ("Material", &specs.material),
        ("Weight", &specs.weight),
        ("Dimensions", &specs.dimensions),
        ("Color", &specs.color),
        ("Waterproof", &specs.waterproof_rating),
    ];
    if rows.iter().any(|(_, v)| v.is_some()) {
        let _ = writeln!(out, "\nSpecifications:");
        for (label, value) in rows {
            if let Some(value) = value {
                let _ = writeln!(out, "  {label:<12}{value}");
            }
        }
    }
    list_section(&mut out, "Compatible with", &accessory.compatibility);
    list_section(&mut out, "Features", &accessory.features);
    list_section(&mut out, "Images", &accessory.images);
    out
}

/// The cart page. `cart` is `None` when nobody is signed in.
pub(crate) fn cart_page(cart: Option<&Cart>) -> String {
    let Some(cart) = cart else {
        return "Please login to view your cart".to_owned();
    };
    if cart.is_empty() {
        return "Your cart is empty".to_owned();
    }
    let currency = cart.currency();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<26}{:<NAME_WIDTH$}{:>5}{:>14}",
        "ITEM", "PRODUCT", "QTY", "SUBTOTAL"
    );
    for item in &cart.items {
        let name = item
            .product
            .as_ref()
            .map_or("(no longer available)", |p| p.name.as_str());
        let _ = writeln!(
            out,
            "{:<26}{:<NAME_WIDTH$}{:>5}{:>14}",
            item.id,
            truncate(name, NAME_WIDTH - 2),
            item.quantity,
            format_price(item.line_total(), currency)
        );
    }
    let _ = writeln!(
        out,
        "\n{} items, total {}",
        cart.item_count(),
        format_price(cart.total(), currency)
    );
    out.push_str("Proceed to Checkout (Coming Soon)");
    out
}

pub(crate) fn success(message: &str) -> String {
    format!("\u{2714} {message}")
}

pub(crate) fn failure(message: &str) -> String {
    format!("\u{2716} {message}")
}
