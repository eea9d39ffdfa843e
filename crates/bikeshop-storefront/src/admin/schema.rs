//! Declarative field lists for the admin create/edit forms.
//!
//! Each entity has one [`FormSchema`]. The same schema drives the draft's
//! initial values, input handling, pre-submit validation, and the multipart
//! keys the draft is serialized under, in both create and edit mode.

use crate::catalog::filters::{
    ASSIST_RANGES, DRIVETRAINS, FRAME_TYPES, MODEL_COMPATIBILITY, PRODUCT_CATEGORIES,
    RIDER_HEIGHTS, RIDING_POSTURES, RIDING_STYLES, SUSPENSIONS,
};

pub const CURRENCIES: &[&str] = &["USD", "EUR"];

pub const ACCESSORY_FORM_CATEGORIES: &[&str] = &[
    "Extend Accessories",
    "Replacement Parts",
    "Drivetrain",
    "Electrical",
];

/// Compatibility choices in the accessory form; the catalog models plus a
/// catch-all.
pub const COMPATIBILITY_OPTIONS: &[&str] = &[
    MODEL_COMPATIBILITY[0],
    MODEL_COMPATIBILITY[1],
    MODEL_COMPATIBILITY[2],
    MODEL_COMPATIBILITY[3],
    MODEL_COMPATIBILITY[4],
    MODEL_COMPATIBILITY[5],
    MODEL_COMPATIBILITY[6],
    "All Models",
];

pub const IMAGES_REQUIRED: &str = "At least one image is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    /// Decimal number, kept as typed text until submit.
    Number,
    /// Whole number, kept as typed text until submit.
    Integer,
    Checkbox,
    /// One of the listed options, or empty.
    Select(&'static [&'static str]),
    /// Any subset of the listed options.
    MultiSelect(&'static [&'static str]),
    /// Free-form list such as features.
    List,
}

impl FieldKind {
    #[must_use]
    pub fn is_list(self) -> bool {
        matches!(self, FieldKind::List | FieldKind::MultiSelect(_))
    }
}

/// Pre-submit check for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Optional,
    /// Non-blank text.
    Required(&'static str),
    /// A price that must be present and non-negative.
    Price {
        missing: &'static str,
        invalid: &'static str,
    },
    /// When filled in, a number within `min..=max`.
    Range {
        min: i64,
        max: Option<i64>,
        message: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Dotted path into the entity, e.g. `price.current`.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rule: Rule,
    /// Multipart key, e.g. `price[current]`. List fields get `[i]` appended.
    pub wire_key: &'static str,
    /// Initial value in create mode; `"true"`/`"false"` for checkboxes.
    pub default: &'static str,
}

impl FieldSpec {
    const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            rule: Rule::Optional,
            wire_key: key,
            default: "",
        }
    }

    const fn wire(mut self, wire_key: &'static str) -> Self {
        self.wire_key = wire_key;
        self
    }

    const fn rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    const fn initially(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }
}

/// Repeated record groups that sit outside the flat field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// `variants[i][variantId|name|price]`.
    Variants,
    /// `colors[i][name|quantity]`.
    Colors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSchema {
    /// Singular noun used in messages, e.g. `"product"`.
    pub noun: &'static str,
    pub plural: &'static str,
    pub fields: &'static [FieldSpec],
    pub records: &'static [RecordKind],
    pub images_required: bool,
}

impl FormSchema {
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }

    #[must_use]
    pub fn has_records(&self, kind: RecordKind) -> bool {
        self.records.contains(&kind)
    }
}

const CURRENT_PRICE: Rule = Rule::Price {
    missing: "Current price is required",
    invalid: "Please enter a valid current price",
};

const ORIGINAL_PRICE: Rule = Rule::Range {
    min: 0,
    max: None,
    message: "Please enter a valid original price",
};

pub static PRODUCT_SCHEMA: FormSchema = FormSchema {
    noun: "product",
    plural: "products",
    fields: &[
        FieldSpec::new("name", "Product Name", FieldKind::Text)
            .rule(Rule::Required("Product name is required")),
        FieldSpec::new("tagline", "Tagline", FieldKind::Text),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
        FieldSpec::new("category", "Category", FieldKind::Select(PRODUCT_CATEGORIES))
            .initially("Electric Bike"),
        FieldSpec::new("price.current", "Current Price", FieldKind::Number)
            .wire("price[current]")
            .rule(CURRENT_PRICE),
        FieldSpec::new("price.original", "Original Price", FieldKind::Number)
            .wire("price[original]")
            .rule(ORIGINAL_PRICE),
        FieldSpec::new("price.currency", "Currency", FieldKind::Select(CURRENCIES))
            .wire("price[currency]")
            .initially("USD"),
        FieldSpec::new("specifications.motorPower", "Motor Power", FieldKind::Text)
            .wire("specifications[motorPower]"),
        FieldSpec::new("specifications.batteryCapacity", "Battery Capacity", FieldKind::Text)
            .wire("specifications[batteryCapacity]"),
        FieldSpec::new("specifications.rangeKm", "Range (km)", FieldKind::Number)
            .wire("specifications[rangeKm]")
            .rule(Rule::Range {
                min: 0,
                max: None,
                message: "Range must be a positive number",
            }),
        FieldSpec::new("specifications.weightKg", "Weight (kg)", FieldKind::Number)
            .wire("specifications[weightKg]")
            .rule(Rule::Range {
                min: 0,
                max: None,
                message: "Weight must be a positive number",
            }),
        FieldSpec::new("specifications.maxSpeedKmh", "Max Speed (km/h)", FieldKind::Number)
            .wire("specifications[maxSpeedKmh]")
            .rule(Rule::Range {
                min: 0,
                max: None,
                message: "Max speed must be a positive number",
            }),
        FieldSpec::new("specifications.brakes", "Brakes", FieldKind::Text)
            .wire("specifications[brakes]"),
        FieldSpec::new("specifications.foldable", "Foldable", FieldKind::Checkbox)
            .wire("specifications[foldable]")
            .initially("false"),
        FieldSpec::new("features", "Features", FieldKind::List),
        FieldSpec::new("inStock", "In Stock", FieldKind::Checkbox).initially("true"),
        FieldSpec::new("quantity", "Quantity", FieldKind::Integer).rule(Rule::Range {
            min: 0,
            max: None,
            message: "Quantity cannot be negative",
        }),
        FieldSpec::new("isListed", "Listed", FieldKind::Checkbox).initially("true"),
        FieldSpec::new("reviews.ratingAverage", "Rating Average", FieldKind::Number)
            .wire("reviews[ratingAverage]")
            .rule(Rule::Range {
                min: 0,
                max: Some(5),
                message: "Rating must be between 0 and 5",
            })
            .initially("0"),
        FieldSpec::new("reviews.ratingCount", "Rating Count", FieldKind::Integer)
            .wire("reviews[ratingCount]")
            .rule(Rule::Range {
                min: 0,
                max: None,
                message: "Rating count cannot be negative",
            })
            .initially("0"),
        FieldSpec::new("ridingStyles", "Riding Styles", FieldKind::MultiSelect(RIDING_STYLES)),
        FieldSpec::new("frameType", "Frame Type", FieldKind::Select(FRAME_TYPES)),
        FieldSpec::new("ridingPosture", "Riding Posture", FieldKind::Select(RIDING_POSTURES)),
        FieldSpec::new("drivetrain", "Drivetrain", FieldKind::Select(DRIVETRAINS)),
        FieldSpec::new("suspension", "Suspension", FieldKind::Select(SUSPENSIONS)),
        FieldSpec::new(
            "electricAssistRange",
            "Electric Assist Range",
            FieldKind::Select(ASSIST_RANGES),
        ),
        FieldSpec::new("payload", "Payload (lbs)", FieldKind::Integer).rule(Rule::Range {
            min: 0,
            max: None,
            message: "Payload must be a whole number of lbs",
        }),
        FieldSpec::new("riderHeight", "Rider Height", FieldKind::MultiSelect(RIDER_HEIGHTS)),
        FieldSpec::new("url", "Product URL", FieldKind::Text),
    ],
    records: &[RecordKind::Variants, RecordKind::Colors],
    images_required: true,
};

pub static ACCESSORY_SCHEMA: FormSchema = FormSchema {
    noun: "accessory",
    plural: "accessories",
    fields: &[
        FieldSpec::new("name", "Name", FieldKind::Text)
            .rule(Rule::Required("Accessory name is required")),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
        FieldSpec::new("category", "Category", FieldKind::Select(ACCESSORY_FORM_CATEGORIES))
            .initially("Extend Accessories"),
        FieldSpec::new("subCategory", "Sub-category", FieldKind::Text),
        FieldSpec::new("price.current", "Current Price", FieldKind::Number)
            .wire("price[current]")
            .rule(CURRENT_PRICE),
        FieldSpec::new("price.original", "Original Price", FieldKind::Number)
            .wire("price[original]")
            .rule(ORIGINAL_PRICE),
        FieldSpec::new("price.currency", "Currency", FieldKind::Select(CURRENCIES))
            .wire("price[currency]")
            .initially("USD"),
        FieldSpec::new(
            "compatibility",
            "Compatible Models",
            FieldKind::MultiSelect(COMPATIBILITY_OPTIONS),
        ),
        FieldSpec::new("specifications.material", "Material", FieldKind::Text)
            .wire("specifications[material]"),
        FieldSpec::new("specifications.weight", "Weight", FieldKind::Text)
            .wire("specifications[weight]"),
        FieldSpec::new("specifications.dimensions", "Dimensions", FieldKind::Text)
            .wire("specifications[dimensions]"),
        FieldSpec::new("specifications.color", "Color", FieldKind::Text)
            .wire("specifications[color]"),
        FieldSpec::new(
            "specifications.waterproofRating",
            "Waterproof Rating",
            FieldKind::Text,
        )
        .wire("specifications[waterproofRating]"),
        FieldSpec::new("stockStatus.inStock", "In Stock", FieldKind::Checkbox)
            .wire("stockStatus[inStock]")
            .initially("true"),
        FieldSpec::new("stockStatus.quantity", "Quantity", FieldKind::Integer)
            .wire("stockStatus[quantity]")
            .rule(Rule::Range {
                min: 0,
                max: None,
                message: "Quantity cannot be negative",
            })
            .initially("0"),
        FieldSpec::new("features", "Features", FieldKind::List),
        FieldSpec::new("isReplacementPart", "Replacement Part", FieldKind::Checkbox)
            .initially("false"),
        FieldSpec::new("isListed", "Listed", FieldKind::Checkbox).initially("true"),
    ],
    records: &[],
    images_required: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_is_unique_per_schema() {
        for schema in [&PRODUCT_SCHEMA, &ACCESSORY_SCHEMA] {
            for (i, field) in schema.fields.iter().enumerate() {
                assert_eq!(schema.position(field.key), Some(i), "duplicate {}", field.key);
            }
        }
    }

    #[test]
    fn nested_keys_use_bracket_wire_keys() {
        let field = PRODUCT_SCHEMA.field("specifications.motorPower").unwrap();
        assert_eq!(field.wire_key, "specifications[motorPower]");
        for schema in [&PRODUCT_SCHEMA, &ACCESSORY_SCHEMA] {
            for field in schema.fields {
                assert_eq!(field.key.contains('.'), field.wire_key.contains('['));
            }
        }
    }

    #[test]
    fn compatibility_options_extend_catalog_models() {
        assert_eq!(COMPATIBILITY_OPTIONS.len(), MODEL_COMPATIBILITY.len() + 1);
        assert_eq!(COMPATIBILITY_OPTIONS.last(), Some(&"All Models"));
    }
}
