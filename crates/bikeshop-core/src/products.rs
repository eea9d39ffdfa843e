use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::price::Price;

/// A bike as returned by `GET /products` and `GET /products/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Short marketing line shown under the name on cards.
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub specifications: ProductSpecifications,
    #[serde(default)]
    pub price: Price,
    /// Ordered image URLs; the first one is the card/cover image.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub reviews: Option<RatingSummary>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub colors: Vec<ColorStock>,
    #[serde(default)]
    pub riding_styles: Vec<String>,
    #[serde(default)]
    pub frame_type: Option<String>,
    #[serde(default)]
    pub riding_posture: Option<String>,
    #[serde(default)]
    pub drivetrain: Option<String>,
    #[serde(default)]
    pub suspension: Option<String>,
    #[serde(default)]
    pub electric_assist_range: Option<String>,
    /// Maximum payload in lbs. Accepts `440` or `"440lbs"` on the wire.
    #[serde(default, deserialize_with = "deserialize_payload_lbs")]
    pub payload: Option<u32>,
    #[serde(default)]
    pub rider_height: Vec<String>,
    #[serde(default)]
    pub is_listed: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
    /// Server-computed discount, preferred over the price block when present.
    #[serde(default)]
    pub discount_amount: Option<Decimal>,
}

impl Product {
    /// Stock flag, falling back to `quantity > 0` when the flag is absent.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.in_stock
            .unwrap_or_else(|| self.quantity.is_some_and(|q| q > 0))
    }

    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whole-unit discount for the card badge.
    #[must_use]
    pub fn discount(&self) -> i64 {
        use rust_decimal::prelude::ToPrimitive;

        match self.discount_amount {
            Some(amount) if amount > Decimal::ZERO => amount
                .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
                .unwrap_or(0),
            _ => self.price.discount_amount(),
        }
    }
}

/// Technical specifications of a bike.
///
/// Admin form revisions disagree on the shape (flat fields vs. nested groups),
/// so the known flat fields are typed and anything else is kept verbatim in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpecifications {
    #[serde(default)]
    pub motor_power: Option<String>,
    #[serde(default)]
    pub battery_capacity: Option<String>,
    #[serde(default)]
    pub range_km: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub max_speed_kmh: Option<f64>,
    #[serde(default)]
    pub brakes: Option<String>,
    #[serde(default)]
    pub foldable: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Rating summary as returned under `reviews`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    #[serde(default, alias = "average")]
    pub rating_average: f64,
    #[serde(default, alias = "count")]
    pub rating_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(alias = "id", alias = "_id")]
    pub variant_id: String,
    pub name: String,
    pub price: Decimal,
}

/// A colour option and how many units of it are in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorStock {
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
}

/// Parses a payload facet value such as `"264lbs"` into pounds.
#[must_use]
pub fn parse_payload_lbs(raw: &str) -> Option<u32> {
    raw.trim()
        .trim_end_matches("lbs")
        .trim_end_matches("lb")
        .trim()
        .parse::<u32>()
        .ok()
}

fn deserialize_payload_lbs<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(text)) => parse_payload_lbs(&text),
        None => None,
    })
}
