//! Filter sidebars for the product and accessory listings.
//!
//! A facet at its default value never reaches the query; a facet away from
//! its default always does, and counts once toward the active-filter badge.

use std::str::FromStr;

use bikeshop_core::{parse_payload_lbs, QueryParams};
use thiserror::Error;

use super::price_range::PriceRange;

pub const PRODUCT_PRICE_DEFAULT: PriceRange = PriceRange::new(499, 1799);
pub const ACCESSORY_PRICE_DEFAULT: PriceRange = PriceRange::new(0, 5000);

pub const PRODUCT_CATEGORIES: &[&str] = &[
    "Mountain Bike",
    "Road Bike",
    "Hybrid Bike",
    "Electric Bike",
    "Kids Bike",
    "Accessories",
];

pub const RIDING_STYLES: &[&str] = &[
    "Urban Commuting",
    "Off-road / Mountain Riding",
    "Long-distance Touring",
    "Leisure Riding / Daily Errands",
    "Cargo & Delivery Use",
];
pub const FRAME_TYPES: &[&str] = &["Foldable", "Low step", "Mid step", "High step"];
pub const RIDING_POSTURES: &[&str] = &["Upright", "Active", "Sporty"];
pub const DRIVETRAINS: &[&str] = &["Chain", "Belt"];
pub const ASSIST_RANGES: &[&str] = &["43-60 mile", ">60 mile"];
pub const PAYLOADS: &[&str] = &["264lbs", "440lbs"];
pub const RIDER_HEIGHTS: &[&str] = &[
    "150cm (4'11\") - 185cm (6'1\")",
    "155cm (5'1\") - 185cm (6'1\")",
    "160cm (5'3\") - 190cm (6'3\")",
    "165cm (5'5\") - 195cm (6'5\")",
];
pub const SUSPENSIONS: &[&str] = &[
    "Front Suspension",
    "Full Suspension",
    "No Suspension / Rigid Fork",
];
pub const COLORS: &[&str] = &["White", "Green", "Blue", "Grey", "Black"];

pub const ACCESSORY_CATEGORIES: &[&str] = &["Extend Accessories", "Replacement Parts"];
pub const EXTEND_ACCESSORY_SUBCATEGORIES: &[&str] =
    &["Trailers", "Bags", "Basket", "Rear Rack", "Other Accessories"];
pub const REPLACEMENT_PART_SUBCATEGORIES: &[&str] = &[
    "Batteries & Chargers",
    "Motor",
    "Brakes",
    "Display",
    "Inner Tubes",
    "Drivetrain",
];
pub const MODEL_COMPATIBILITY: &[&str] = &["Titan", "C11", "C11 PRO", "C21", "C22", "T1 PRO", "T2"];

/// Shared behaviour of a listing's filter state.
pub trait Filters: Default + Clone {
    type Facet: Copy;

    /// Adds `value` to a multi-select facet, or removes it if already selected.
    fn toggle(&mut self, facet: Self::Facet, value: &str);

    fn availability_mut(&mut self) -> &mut Availability;

    fn price(&self) -> &PriceRange;

    fn price_mut(&mut self) -> &mut PriceRange;

    /// Number of facets away from their default, for the filter badge.
    fn active_count(&self) -> usize;

    /// Appends every non-default facet to `params`.
    fn apply_to(&self, params: &mut QueryParams);

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Stock checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stock {
    InStock,
    OutOfStock,
}

/// The two availability checkboxes. Only an exclusive selection filters;
/// none or both is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Availability {
    in_stock: bool,
    out_of_stock: bool,
}

impl Availability {
    pub fn toggle(&mut self, stock: Stock) {
        match stock {
            Stock::InStock => self.in_stock = !self.in_stock,
            Stock::OutOfStock => self.out_of_stock = !self.out_of_stock,
        }
    }

    #[must_use]
    pub fn is_checked(&self, stock: Stock) -> bool {
        match stock {
            Stock::InStock => self.in_stock,
            Stock::OutOfStock => self.out_of_stock,
        }
    }

    /// Value of the `inStock` parameter, if the selection is exclusive.
    #[must_use]
    pub fn param(&self) -> Option<bool> {
        match (self.in_stock, self.out_of_stock) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            _ => None,
        }
    }
}

fn toggle_value(values: &mut Vec<String>, value: &str) {
    if let Some(pos) = values.iter().position(|v| v == value) {
        values.remove(pos);
    } else {
        values.push(value.to_owned());
    }
}

fn push_all(params: &mut QueryParams, key: &str, values: &[String]) {
    for value in values {
        params.push(key, value);
    }
}

fn apply_price(params: &mut QueryParams, price: &PriceRange, default: &PriceRange) {
    if price.min() != default.min() {
        params.push("priceMin", price.min());
    }
    if price.max() != default.max() {
        params.push("priceMax", price.max());
    }
}

#[derive(Debug, Error)]
#[error("unknown facet \"{0}\"")]
pub struct UnknownFacet(String);

/// Multi-select facets of the bike listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductFacet {
    RidingStyles,
    FrameType,
    RidingPosture,
    Drivetrain,
    ElectricAssistRange,
    Payload,
    RiderHeight,
    Suspension,
    Colors,
}

impl ProductFacet {
    pub const ALL: [ProductFacet; 9] = [
        ProductFacet::RidingStyles,
        ProductFacet::FrameType,
        ProductFacet::RidingPosture,
        ProductFacet::Drivetrain,
        ProductFacet::ElectricAssistRange,
        ProductFacet::Payload,
        ProductFacet::RiderHeight,
        ProductFacet::Suspension,
        ProductFacet::Colors,
    ];

    /// Query parameter name.
    #[must_use]
    pub fn param(self) -> &'static str {
        match self {
            ProductFacet::RidingStyles => "ridingStyles",
            ProductFacet::FrameType => "frameType",
            ProductFacet::RidingPosture => "ridingPosture",
            ProductFacet::Drivetrain => "drivetrain",
            ProductFacet::ElectricAssistRange => "electricAssistRange",
            ProductFacet::Payload => "payload",
            ProductFacet::RiderHeight => "riderHeight",
            ProductFacet::Suspension => "suspension",
            ProductFacet::Colors => "colors",
        }
    }

    #[must_use]
    pub fn options(self) -> &'static [&'static str] {
        match self {
            ProductFacet::RidingStyles => RIDING_STYLES,
            ProductFacet::FrameType => FRAME_TYPES,
            ProductFacet::RidingPosture => RIDING_POSTURES,
            ProductFacet::Drivetrain => DRIVETRAINS,
            ProductFacet::ElectricAssistRange => ASSIST_RANGES,
            ProductFacet::Payload => PAYLOADS,
            ProductFacet::RiderHeight => RIDER_HEIGHTS,
            ProductFacet::Suspension => SUSPENSIONS,
            ProductFacet::Colors => COLORS,
        }
    }
}

impl FromStr for ProductFacet {
    type Err = UnknownFacet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|facet| facet.param().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFacet(s.to_owned()))
    }
}

/// Filter state of the bike listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilters {
    category: Option<String>,
    riding_styles: Vec<String>,
    frame_type: Vec<String>,
    riding_posture: Vec<String>,
    drivetrain: Vec<String>,
    electric_assist_range: Vec<String>,
    payload: Vec<String>,
    rider_height: Vec<String>,
    suspension: Vec<String>,
    colors: Vec<String>,
    availability: Availability,
    price: PriceRange,
}

impl Default for ProductFilters {
    fn default() -> Self {
        Self {
            category: None,
            riding_styles: Vec::new(),
            frame_type: Vec::new(),
            riding_posture: Vec::new(),
            drivetrain: Vec::new(),
            electric_assist_range: Vec::new(),
            payload: Vec::new(),
            rider_height: Vec::new(),
            suspension: Vec::new(),
            colors: Vec::new(),
            availability: Availability::default(),
            price: PRODUCT_PRICE_DEFAULT,
        }
    }
}

impl ProductFilters {
    /// Selected values of a facet, in selection order.
    #[must_use]
    pub fn selected(&self, facet: ProductFacet) -> &[String] {
        match facet {
            ProductFacet::RidingStyles => &self.riding_styles,
            ProductFacet::FrameType => &self.frame_type,
            ProductFacet::RidingPosture => &self.riding_posture,
            ProductFacet::Drivetrain => &self.drivetrain,
            ProductFacet::ElectricAssistRange => &self.electric_assist_range,
            ProductFacet::Payload => &self.payload,
            ProductFacet::RiderHeight => &self.rider_height,
            ProductFacet::Suspension => &self.suspension,
            ProductFacet::Colors => &self.colors,
        }
    }

    fn selected_mut(&mut self, facet: ProductFacet) -> &mut Vec<String> {
        match facet {
            ProductFacet::RidingStyles => &mut self.riding_styles,
            ProductFacet::FrameType => &mut self.frame_type,
            ProductFacet::RidingPosture => &mut self.riding_posture,
            ProductFacet::Drivetrain => &mut self.drivetrain,
            ProductFacet::ElectricAssistRange => &mut self.electric_assist_range,
            ProductFacet::Payload => &mut self.payload,
            ProductFacet::RiderHeight => &mut self.rider_height,
            ProductFacet::Suspension => &mut self.suspension,
            ProductFacet::Colors => &mut self.colors,
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Single-select category; an empty name clears it.
    pub fn set_category(&mut self, category: Option<&str>) {
        self.category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_owned);
    }

    #[must_use]
    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// Heaviest selected payload in lbs.
    fn max_payload(&self) -> Option<u32> {
        self.payload.iter().filter_map(|p| parse_payload_lbs(p)).max()
    }
}

impl Filters for ProductFilters {
    type Facet = ProductFacet;

    fn toggle(&mut self, facet: ProductFacet, value: &str) {
        toggle_value(self.selected_mut(facet), value);
    }

    fn availability_mut(&mut self) -> &mut Availability {
        &mut self.availability
    }

    fn price(&self) -> &PriceRange {
        &self.price
    }

    fn price_mut(&mut self) -> &mut PriceRange {
        &mut self.price
    }

    fn active_count(&self) -> usize {
        let facets = ProductFacet::ALL
            .into_iter()
            .filter(|facet| !self.selected(*facet).is_empty())
            .count();
        facets
            + usize::from(self.category.is_some())
            + usize::from(self.availability.param().is_some())
            + usize::from(self.price != PRODUCT_PRICE_DEFAULT)
    }

    fn apply_to(&self, params: &mut QueryParams) {
        if let Some(category) = &self.category {
            params.push("category", category);
        }
        if let Some(in_stock) = self.availability.param() {
            params.push("inStock", in_stock);
        }
        for facet in ProductFacet::ALL {
            let values = self.selected(facet);
            if values.is_empty() {
                continue;
            }
            match facet {
                // Single-valued on the server: the first selection wins.
                ProductFacet::Drivetrain
                | ProductFacet::ElectricAssistRange
                | ProductFacet::Suspension => params.push(facet.param(), &values[0]),
                ProductFacet::Payload => {
                    if let Some(lbs) = self.max_payload() {
                        params.push(facet.param(), lbs);
                    }
                }
                _ => push_all(params, facet.param(), values),
            }
        }
        apply_price(params, &self.price, &PRODUCT_PRICE_DEFAULT);
    }
}

/// Multi-select facets of the accessory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessoryFacet {
    Category,
    SubCategory,
    Compatibility,
}

impl AccessoryFacet {
    pub const ALL: [AccessoryFacet; 3] = [
        AccessoryFacet::Category,
        AccessoryFacet::SubCategory,
        AccessoryFacet::Compatibility,
    ];

    #[must_use]
    pub fn param(self) -> &'static str {
        match self {
            AccessoryFacet::Category => "category",
            AccessoryFacet::SubCategory => "subCategory",
            AccessoryFacet::Compatibility => "compatibility",
        }
    }
}

impl FromStr for AccessoryFacet {
    type Err = UnknownFacet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|facet| facet.param().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFacet(s.to_owned()))
    }
}

/// Filter state of the accessory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessoryFilters {
    category: Vec<String>,
    sub_category: Vec<String>,
    compatibility: Vec<String>,
    availability: Availability,
    price: PriceRange,
}

impl Default for AccessoryFilters {
    fn default() -> Self {
        Self {
            category: Vec::new(),
            sub_category: Vec::new(),
            compatibility: Vec::new(),
            availability: Availability::default(),
            price: ACCESSORY_PRICE_DEFAULT,
        }
    }
}

impl AccessoryFilters {
    #[must_use]
    pub fn selected(&self, facet: AccessoryFacet) -> &[String] {
        match facet {
            AccessoryFacet::Category => &self.category,
            AccessoryFacet::SubCategory => &self.sub_category,
            AccessoryFacet::Compatibility => &self.compatibility,
        }
    }

    #[must_use]
    pub fn availability(&self) -> Availability {
        self.availability
    }
}

impl Filters for AccessoryFilters {
    type Facet = AccessoryFacet;

    fn toggle(&mut self, facet: AccessoryFacet, value: &str) {
        let values = match facet {
            AccessoryFacet::Category => &mut self.category,
            AccessoryFacet::SubCategory => &mut self.sub_category,
            AccessoryFacet::Compatibility => &mut self.compatibility,
        };
        toggle_value(values, value);
    }

    fn availability_mut(&mut self) -> &mut Availability {
        &mut self.availability
    }

    fn price(&self) -> &PriceRange {
        &self.price
    }

    fn price_mut(&mut self) -> &mut PriceRange {
        &mut self.price
    }

    fn active_count(&self) -> usize {
        let facets = AccessoryFacet::ALL
            .into_iter()
            .filter(|facet| !self.selected(*facet).is_empty())
            .count();
        facets
            + usize::from(self.availability.param().is_some())
            + usize::from(self.price != ACCESSORY_PRICE_DEFAULT)
    }

    fn apply_to(&self, params: &mut QueryParams) {
        for facet in AccessoryFacet::ALL {
            push_all(params, facet.param(), self.selected(facet));
        }
        apply_price(params, &self.price, &ACCESSORY_PRICE_DEFAULT);
        if let Some(in_stock) = self.availability.param() {
            params.push("inStock", in_stock);
        }
    }
}
