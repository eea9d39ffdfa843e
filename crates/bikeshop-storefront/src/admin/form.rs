//! One create/edit form for any admin entity, driven by its [`FormSchema`].
//!
//! The draft holds every field as typed text (numbers are parsed only at
//! submit), plus record groups and images. Submitting validates first and
//! sends nothing if a check fails; otherwise the whole draft is serialized,
//! unchanged fields included.

use std::marker::PhantomData;
use std::str::FromStr;

use bikeshop_client::{ApiClient, FileUpload, FormPayload};
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use super::images::ImageSet;
use super::schema::{FieldKind, FieldSpec, FormSchema, RecordKind, Rule, IMAGES_REQUIRED};
use super::AdminEntity;
use crate::error::{ActionError, FormError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDraft {
    pub variant_id: String,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorDraft {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct EntityForm<E> {
    schema: &'static FormSchema,
    mode: FormMode,
    /// Parallel to `schema.fields`.
    values: Vec<FieldValue>,
    variants: Vec<VariantDraft>,
    colors: Vec<ColorDraft>,
    images: ImageSet,
    entity: PhantomData<fn() -> E>,
}

fn initial_value(field: &FieldSpec) -> FieldValue {
    match field.kind {
        FieldKind::Checkbox => FieldValue::Flag(field.default == "true"),
        kind if kind.is_list() => FieldValue::List(Vec::new()),
        _ => FieldValue::Text(field.default.to_owned()),
    }
}

/// Reads a dotted path such as `price.current` out of a JSON object.
fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |node, part| node.get(part))
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn seeded_value(field: &FieldSpec, json: &Value) -> FieldValue {
    let Some(found) = lookup(json, field.key).filter(|v| !v.is_null()) else {
        return initial_value(field);
    };
    match field.kind {
        FieldKind::Checkbox => found
            .as_bool()
            .map_or_else(|| initial_value(field), FieldValue::Flag),
        kind if kind.is_list() => FieldValue::List(
            found
                .as_array()
                .map(|items| items.iter().filter_map(value_to_text).collect())
                .unwrap_or_default(),
        ),
        _ => value_to_text(found).map_or_else(|| initial_value(field), FieldValue::Text),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Some(true),
        "false" | "no" | "n" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn invalid_value(field: &FieldSpec, reason: impl Into<String>) -> FormError {
    FormError::InvalidValue {
        label: field.label.to_owned(),
        reason: reason.into(),
    }
}

fn check_option(field: &FieldSpec, options: &[&str], value: &str) -> Result<(), FormError> {
    if options.iter().any(|option| *option == value) {
        Ok(())
    } else {
        Err(invalid_value(
            field,
            format!("expected one of: {}", options.join(", ")),
        ))
    }
}

/// Decimal text with trailing zeros removed, as sent on the wire.
fn wire_number(value: Decimal) -> String {
    value.normalize().to_string()
}

impl<E: AdminEntity> Default for EntityForm<E> {
    fn default() -> Self {
        Self::create()
    }
}

impl<E: AdminEntity> EntityForm<E> {
    /// Blank draft with the schema's defaults.
    #[must_use]
    pub fn create() -> Self {
        let schema = E::schema();
        Self {
            schema,
            mode: FormMode::Create,
            values: schema.fields.iter().map(initial_value).collect(),
            variants: Vec::new(),
            colors: Vec::new(),
            images: ImageSet::default(),
            entity: PhantomData,
        }
    }

    /// Draft seeded from an existing entity. Fields the entity leaves out
    /// keep their defaults; its images become the retained server images.
    #[must_use]
    pub fn edit(entity: &E) -> Self {
        let schema = E::schema();
        let json = serde_json::to_value(entity).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read {} into the form", schema.noun);
            Value::Null
        });
        Self {
            schema,
            mode: FormMode::Edit {
                id: entity.id().to_owned(),
            },
            values: schema
                .fields
                .iter()
                .map(|field| seeded_value(field, &json))
                .collect(),
            variants: entity.variant_drafts(),
            colors: entity.color_drafts(),
            images: ImageSet::with_existing(entity.image_urls().to_vec()),
            entity: PhantomData,
        }
    }

    #[must_use]
    pub fn schema(&self) -> &'static FormSchema {
        self.schema
    }

    #[must_use]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// `"Edit Product"` / `"Add New Accessory"` style heading.
    #[must_use]
    pub fn title(&self) -> String {
        let noun = self.schema.noun;
        let capitalized = noun
            .chars()
            .take(1)
            .flat_map(char::to_uppercase)
            .chain(noun.chars().skip(1))
            .collect::<String>();
        match self.mode {
            FormMode::Create => format!("Add New {capitalized}"),
            FormMode::Edit { .. } => format!("Edit {capitalized}"),
        }
    }

    fn slot(&self, key: &str) -> Result<(usize, &'static FieldSpec), FormError> {
        let schema: &'static FormSchema = self.schema;
        let index = schema
            .position(key)
            .ok_or_else(|| FormError::UnknownField(key.to_owned()))?;
        Ok((index, &schema.fields[index]))
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.schema.position(key).map(|i| &self.values[i])
    }

    /// Current text of a text-like field.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.value(key)? {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.value(key)? {
            FieldValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    #[must_use]
    pub fn list(&self, key: &str) -> &[String] {
        match self.value(key) {
            Some(FieldValue::List(items)) => items,
            _ => &[],
        }
    }

    /// Applies raw input to a field the way its input control would.
    ///
    /// List fields take a comma-separated value and replace the whole list.
    ///
    /// # Errors
    ///
    /// Unknown keys, non-boolean checkbox input, and values outside a
    /// select's options are rejected.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), FormError> {
        let (index, field) = self.slot(key)?;
        let value = match field.kind {
            FieldKind::Checkbox => FieldValue::Flag(
                parse_flag(raw).ok_or_else(|| invalid_value(field, "expected true or false"))?,
            ),
            FieldKind::Select(options) => {
                let choice = raw.trim();
                if !choice.is_empty() {
                    check_option(field, options, choice)?;
                }
                FieldValue::Text(choice.to_owned())
            }
            FieldKind::List | FieldKind::MultiSelect(_) => {
                let items = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect();
                return self.set_list(key, items);
            }
            FieldKind::Text | FieldKind::TextArea | FieldKind::Number | FieldKind::Integer => {
                FieldValue::Text(raw.to_owned())
            }
        };
        self.values[index] = value;
        Ok(())
    }

    /// Replaces a list field.
    ///
    /// # Errors
    ///
    /// Rejects non-list fields and multi-select values outside the options.
    pub fn set_list(&mut self, key: &str, items: Vec<String>) -> Result<(), FormError> {
        let (index, field) = self.slot(key)?;
        match field.kind {
            FieldKind::MultiSelect(options) => {
                for item in &items {
                    check_option(field, options, item)?;
                }
            }
            FieldKind::List => {}
            _ => return Err(invalid_value(field, "not a list field")),
        }
        self.values[index] = FieldValue::List(items);
        Ok(())
    }

    /// Flips a checkbox.
    ///
    /// # Errors
    ///
    /// Rejects keys that are not checkboxes.
    pub fn toggle(&mut self, key: &str) -> Result<bool, FormError> {
        let (index, field) = self.slot(key)?;
        match &mut self.values[index] {
            FieldValue::Flag(flag) => {
                *flag = !*flag;
                Ok(*flag)
            }
            _ => Err(invalid_value(field, "not a checkbox")),
        }
    }

    /// Adds or removes one option of a multi-select field.
    ///
    /// # Errors
    ///
    /// Rejects non-multi-select keys and unknown options.
    pub fn toggle_option(&mut self, key: &str, option: &str) -> Result<(), FormError> {
        let (index, field) = self.slot(key)?;
        let FieldKind::MultiSelect(options) = field.kind else {
            return Err(invalid_value(field, "not a multi-select field"));
        };
        check_option(field, options, option)?;
        if let FieldValue::List(items) = &mut self.values[index] {
            if let Some(pos) = items.iter().position(|i| i == option) {
                items.remove(pos);
            } else {
                items.push(option.to_owned());
            }
        }
        Ok(())
    }

    /// Appends a trimmed entry to a list field such as features. Blank input
    /// is ignored and returns `false`.
    ///
    /// # Errors
    ///
    /// Rejects keys that are not free-form lists.
    pub fn add_item(&mut self, key: &str, item: &str) -> Result<bool, FormError> {
        let (index, field) = self.slot(key)?;
        if field.kind != FieldKind::List {
            return Err(invalid_value(field, "not a list field"));
        }
        let item = item.trim();
        if item.is_empty() {
            return Ok(false);
        }
        if let FieldValue::List(items) = &mut self.values[index] {
            items.push(item.to_owned());
        }
        Ok(true)
    }

    /// # Errors
    ///
    /// Rejects keys that are not list fields.
    pub fn remove_item(&mut self, key: &str, index: usize) -> Result<Option<String>, FormError> {
        let (slot, field) = self.slot(key)?;
        match &mut self.values[slot] {
            FieldValue::List(items) => Ok((index < items.len()).then(|| items.remove(index))),
            _ => Err(invalid_value(field, "not a list field")),
        }
    }

    #[must_use]
    pub fn variants(&self) -> &[VariantDraft] {
        &self.variants
    }

    /// Adds a variant with a fresh id.
    ///
    /// # Errors
    ///
    /// Rejects the call when the entity has no variants, or when the name
    /// is blank or the price is not a non-negative number.
    pub fn add_variant(&mut self, name: &str, price: &str) -> Result<(), FormError> {
        if !self.schema.has_records(RecordKind::Variants) {
            return Err(FormError::UnknownField("variants".to_owned()));
        }
        let name = name.trim();
        let price = Decimal::from_str(price.trim())
            .ok()
            .filter(|p| !p.is_sign_negative());
        match price {
            Some(price) if !name.is_empty() => {
                self.variants.push(VariantDraft {
                    variant_id: Uuid::new_v4().to_string(),
                    name: name.to_owned(),
                    price,
                });
                Ok(())
            }
            _ => Err(FormError::Invalid(
                "Variant needs a name and a valid price".to_owned(),
            )),
        }
    }

    pub fn remove_variant(&mut self, index: usize) -> Option<VariantDraft> {
        (index < self.variants.len()).then(|| self.variants.remove(index))
    }

    #[must_use]
    pub fn colors(&self) -> &[ColorDraft] {
        &self.colors
    }

    /// # Errors
    ///
    /// Rejects the call when the entity has no colours or the name is blank.
    pub fn add_color(&mut self, name: &str, quantity: u32) -> Result<(), FormError> {
        if !self.schema.has_records(RecordKind::Colors) {
            return Err(FormError::UnknownField("colors".to_owned()));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(FormError::Invalid("Color name is required".to_owned()));
        }
        self.colors.push(ColorDraft {
            name: name.to_owned(),
            quantity,
        });
        Ok(())
    }

    pub fn remove_color(&mut self, index: usize) -> Option<ColorDraft> {
        (index < self.colors.len()).then(|| self.colors.remove(index))
    }

    #[must_use]
    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageSet {
        &mut self.images
    }

    /// # Errors
    ///
    /// Rejects the whole batch if any file is not a JPEG, PNG, or WebP image.
    pub fn add_images(&mut self, uploads: Vec<FileUpload>) -> Result<usize, FormError> {
        self.images.add(uploads)
    }

    /// Runs every field rule in schema order, then the image requirement.
    /// Stops at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`] with the failing rule's message.
    pub fn validate(&self) -> Result<(), FormError> {
        for (field, value) in self.schema.fields.iter().zip(&self.values) {
            let FieldValue::Text(raw) = value else {
                continue;
            };
            check_rule(field, raw.trim())?;
        }
        if self.schema.images_required && self.images.is_empty() {
            return Err(FormError::Invalid(IMAGES_REQUIRED.to_owned()));
        }
        Ok(())
    }

    /// Validates and serializes the full draft.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; nothing is built in that case.
    pub fn to_payload(&self) -> Result<FormPayload, FormError> {
        self.validate()?;

        let mut payload = FormPayload::new();
        for (field, value) in self.schema.fields.iter().zip(&self.values) {
            match value {
                FieldValue::Flag(flag) => {
                    payload.text(field.wire_key, flag);
                }
                FieldValue::List(items) => {
                    for (i, item) in items.iter().enumerate() {
                        payload.text(format!("{}[{i}]", field.wire_key), item);
                    }
                }
                FieldValue::Text(raw) => {
                    let raw = raw.trim();
                    if raw.is_empty() {
                        continue;
                    }
                    match field.kind {
                        FieldKind::Number => match Decimal::from_str(raw) {
                            Ok(n) => payload.text(field.wire_key, wire_number(n)),
                            Err(_) => payload.text(field.wire_key, raw),
                        },
                        _ => payload.text(field.wire_key, raw),
                    };
                }
            }
        }

        for (i, variant) in self.variants.iter().enumerate() {
            payload
                .text(format!("variants[{i}][variantId]"), &variant.variant_id)
                .text(format!("variants[{i}][name]"), &variant.name)
                .text(format!("variants[{i}][price]"), wire_number(variant.price));
        }
        for (i, color) in self.colors.iter().enumerate() {
            payload
                .text(format!("colors[{i}][name]"), &color.name)
                .text(format!("colors[{i}][quantity]"), color.quantity);
        }
        for (i, url) in self.images.existing().iter().enumerate() {
            payload.text(format!("existingImages[{i}]"), url);
        }
        for image in self.images.pending() {
            payload.file("images", image.upload.clone());
        }
        Ok(payload)
    }

    /// Validates, then creates or updates the entity. A validation failure
    /// returns before any request is made.
    ///
    /// # Errors
    ///
    /// Returns the validation message, the server's message, or
    /// `"Failed to save <noun>"`.
    pub async fn submit(&self, client: &ApiClient) -> Result<E, ActionError> {
        let payload = self.to_payload()?;
        let result = match &self.mode {
            FormMode::Create => E::create(client, payload).await,
            FormMode::Edit { id } => E::update(client, id, payload).await,
        };
        result.map_err(|e| {
            let fallback = format!("Failed to save {}", self.schema.noun);
            ActionError::from_client(&e, &fallback)
        })
    }
}

fn check_rule(field: &FieldSpec, raw: &str) -> Result<(), FormError> {
    match field.rule {
        Rule::Optional => match field.kind {
            FieldKind::Number if !raw.is_empty() && Decimal::from_str(raw).is_err() => Err(
                FormError::Invalid(format!("{} must be a number", field.label)),
            ),
            FieldKind::Integer if !raw.is_empty() && raw.parse::<i64>().is_err() => Err(
                FormError::Invalid(format!("{} must be a whole number", field.label)),
            ),
            _ => Ok(()),
        },
        Rule::Required(message) => {
            if raw.is_empty() {
                Err(FormError::Invalid(message.to_owned()))
            } else {
                Ok(())
            }
        }
        Rule::Price { missing, invalid } => {
            if raw.is_empty() {
                return Err(FormError::Invalid(missing.to_owned()));
            }
            match Decimal::from_str(raw) {
                Ok(price) if !price.is_sign_negative() => Ok(()),
                _ => Err(FormError::Invalid(invalid.to_owned())),
            }
        }
        Rule::Range { min, max, message } => {
            if raw.is_empty() {
                return Ok(());
            }
            let parsed = match field.kind {
                FieldKind::Integer => raw.parse::<i64>().ok().map(Decimal::from),
                _ => Decimal::from_str(raw).ok(),
            };
            let in_range = parsed.is_some_and(|n| {
                n >= Decimal::from(min) && max.is_none_or(|max| n <= Decimal::from(max))
            });
            if in_range {
                Ok(())
            } else {
                Err(FormError::Invalid(message.to_owned()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshop_core::{Accessory, Product};

    fn png(name: &str) -> FileUpload {
        FileUpload {
            file_name: name.to_owned(),
            mime: "image/png".to_owned(),
            bytes: vec![0x89, 0x50],
        }
    }

    fn valid_product_form() -> EntityForm<Product> {
        let mut form = EntityForm::<Product>::create();
        form.set("name", "C22").unwrap();
        form.set("price.current", "1599.00").unwrap();
        form.add_images(vec![png("c22.png")]).unwrap();
        form
    }

    #[test]
    fn create_form_starts_from_schema_defaults() {
        let form = EntityForm::<Product>::create();
        assert_eq!(form.text("category"), Some("Electric Bike"));
        assert_eq!(form.text("price.currency"), Some("USD"));
        assert_eq!(form.flag("inStock"), Some(true));
        assert_eq!(form.flag("specifications.foldable"), Some(false));
        assert!(form.list("features").is_empty());
        assert_eq!(form.title(), "Add New Product");
    }

    #[test]
    fn missing_current_price_is_rejected_first() {
        let mut form = EntityForm::<Product>::create();
        form.set("name", "C22").unwrap();
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Current price is required");
    }

    #[test]
    fn validation_messages_follow_field_order() {
        let mut form = EntityForm::<Accessory>::create();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Accessory name is required"
        );

        form.set("name", "Rear Rack").unwrap();
        form.set("price.current", "-3").unwrap();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Please enter a valid current price"
        );

        form.set("price.current", "59.5").unwrap();
        assert_eq!(form.validate().unwrap_err().to_string(), IMAGES_REQUIRED);
    }

    #[test]
    fn range_rules_check_numeric_fields() {
        let mut form = valid_product_form();
        form.set("reviews.ratingAverage", "5.5").unwrap();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Rating must be between 0 and 5"
        );
        form.set("reviews.ratingAverage", "4.5").unwrap();
        form.set("quantity", "-1").unwrap();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Quantity cannot be negative"
        );
        form.set("quantity", "").unwrap();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn payload_uses_bracket_and_indexed_keys() {
        let mut form = valid_product_form();
        form.set("specifications.motorPower", "750W").unwrap();
        form.add_item("features", "Hydraulic brakes").unwrap();
        form.add_item("features", "   ").unwrap();
        form.add_item("features", "Belt drive").unwrap();
        form.add_color("Black", 3).unwrap();
        form.add_variant("Large", "1699").unwrap();

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.text_value("name"), Some("C22"));
        assert_eq!(payload.text_value("price[current]"), Some("1599"));
        assert_eq!(payload.text_value("specifications[motorPower]"), Some("750W"));
        assert_eq!(payload.text_value("features[0]"), Some("Hydraulic brakes"));
        assert_eq!(payload.text_value("features[1]"), Some("Belt drive"));
        assert_eq!(payload.text_value("colors[0][name]"), Some("Black"));
        assert_eq!(payload.text_value("colors[0][quantity]"), Some("3"));
        assert_eq!(payload.text_value("variants[0][price]"), Some("1699"));
        assert_eq!(payload.text_value("inStock"), Some("true"));
        assert!(payload.text_value("price[original]").is_none());
        assert_eq!(payload.file_count(), 1);
    }

    #[test]
    fn edit_form_is_seeded_from_the_entity() {
        let accessory: Accessory = serde_json::from_value(serde_json::json!({
            "_id": "a1",
            "name": "Rear Rack",
            "category": "Extend Accessories",
            "subCategory": "Rear Rack",
            "price": {"current": 59.5, "original": 79, "currency": "USD"},
            "compatibility": ["C11", "T2"],
            "stockStatus": {"inStock": false, "quantity": 4},
            "images": ["https://cdn.example.com/rack.jpg"],
            "isListed": false
        }))
        .unwrap();

        let form = EntityForm::edit(&accessory);
        assert_eq!(form.mode(), &FormMode::Edit { id: "a1".to_owned() });
        assert_eq!(form.title(), "Edit Accessory");
        assert_eq!(form.text("price.current"), Some("59.5"));
        assert_eq!(form.text("price.original"), Some("79"));
        assert_eq!(form.list("compatibility"), ["C11", "T2"]);
        assert_eq!(form.flag("stockStatus.inStock"), Some(false));
        assert_eq!(form.text("stockStatus.quantity"), Some("4"));
        assert_eq!(form.flag("isListed"), Some(false));

        let payload = form.to_payload().unwrap();
        assert_eq!(
            payload.text_value("existingImages[0]"),
            Some("https://cdn.example.com/rack.jpg")
        );
        assert_eq!(payload.text_value("compatibility[1]"), Some("T2"));
        assert_eq!(payload.file_count(), 0);
    }

    #[test]
    fn dropping_the_last_image_fails_validation() {
        let accessory: Accessory = serde_json::from_value(serde_json::json!({
            "_id": "a1",
            "name": "Bag",
            "price": 20,
            "images": ["https://cdn.example.com/bag.jpg"]
        }))
        .unwrap();
        let mut form = EntityForm::edit(&accessory);
        assert!(form.images_mut().drop_existing("https://cdn.example.com/bag.jpg"));
        assert_eq!(form.validate().unwrap_err().to_string(), IMAGES_REQUIRED);
    }

    #[test]
    fn input_handlers_check_field_kinds() {
        let mut form = EntityForm::<Accessory>::create();
        assert!(matches!(
            form.set("nope", "x"),
            Err(FormError::UnknownField(_))
        ));
        assert!(form.set("isListed", "maybe").is_err());
        assert!(form.set("category", "Wheels").is_err());
        assert!(form.toggle_option("compatibility", "Z9").is_err());

        form.toggle_option("compatibility", "All Models").unwrap();
        assert_eq!(form.list("compatibility"), ["All Models"]);
        form.toggle_option("compatibility", "All Models").unwrap();
        assert!(form.list("compatibility").is_empty());

        assert_eq!(form.toggle("isReplacementPart"), Ok(true));
        assert!(form.add_variant("Large", "10").is_err());
    }

    #[test]
    fn variants_get_unique_ids() {
        let mut form = EntityForm::<Product>::create();
        form.add_variant("Small", "1499").unwrap();
        form.add_variant("Large", "1599").unwrap();
        assert_ne!(form.variants()[0].variant_id, form.variants()[1].variant_id);
        assert!(form.add_variant("", "10").is_err());
        assert!(form.add_variant("XL", "abc").is_err());
        assert_eq!(form.remove_variant(0).unwrap().name, "Small");
    }
}
