//! Admin dashboard handlers: inventory lists and the create/edit forms.
//!
//! Every sub-command except `login` re-validates the stored session and
//! refuses non-admins before touching the API.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde_yaml::Value;
use tokio::io::{AsyncBufReadExt, BufReader};

use bikeshop_client::FileUpload;
use bikeshop_core::{Accessory, Product};
use bikeshop_storefront::admin::{debounced, mime_from_extension};
use bikeshop_storefront::session::ADMIN_ACCESS_DENIED;
use bikeshop_storefront::{AdminEntity, AdminInventory, EntityForm, FormError, FormMode};

use super::{parse_key_val, App};
use crate::views;

/// Sub-commands available under `admin`.
#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// Sign in with an admin account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Manage bikes
    Products {
        #[command(subcommand)]
        command: InventoryCommands,
    },
    /// Manage accessories
    Accessories {
        #[command(subcommand)]
        command: AccessoryAdminCommands,
    },
}

/// Inventory operations shared by products and accessories.
#[derive(Debug, Subcommand)]
pub enum InventoryCommands {
    /// List one page of the inventory
    List {
        /// Server-side search term
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// Read search terms from stdin, one per line, and show settled results
    Search,
    /// Create from a draft
    Create {
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Edit an existing entry
    Update {
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
        /// Stop keeping a current image (repeatable)
        #[arg(long = "drop-image")]
        drop_images: Vec<String>,
    },
    /// Delete an entry
    Delete {
        id: String,
        /// Inventory page the entry is shown on
        #[arg(long, default_value = "1")]
        page: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum AccessoryAdminCommands {
    #[command(flatten)]
    Inventory(InventoryCommands),
    /// List or unlist an accessory in the storefront
    ToggleListing {
        id: String,
        #[arg(long, default_value = "1")]
        page: u32,
    },
}

/// Field input for the create and update forms.
#[derive(Debug, Args)]
pub struct DraftArgs {
    /// YAML map from field keys (e.g. price.current) to values
    #[arg(long)]
    pub draft: Option<PathBuf>,
    /// Single field edit as key=value, applied after the draft (repeatable)
    #[arg(long = "set", value_parser = parse_key_val)]
    pub sets: Vec<(String, String)>,
    /// Image file to upload (repeatable)
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
}

pub(crate) async fn run_admin(app: &App, command: AdminCommands) -> anyhow::Result<()> {
    match command {
        AdminCommands::Login { email, password } => {
            match app.session().admin_login(&email, &password).await {
                Ok(user) => println!("{}", views::success(&format!("Welcome, {}", user.name))),
                Err(e) => println!("{}", views::failure(&e.message)),
            }
            Ok(())
        }
        AdminCommands::Products { command } => {
            require_admin(app).await?;
            run_inventory::<Product>(app, command).await
        }
        AdminCommands::Accessories { command } => {
            require_admin(app).await?;
            match command {
                AccessoryAdminCommands::Inventory(command) => {
                    run_inventory::<Accessory>(app, command).await
                }
                AccessoryAdminCommands::ToggleListing { id, page } => {
                    let mut inventory = inventory::<Accessory>(app);
                    inventory.set_page(page).await;
                    let listed = inventory.toggle_listing(&id).await?;
                    let state = if listed { "listed" } else { "unlisted" };
                    println!("{}", views::success(&format!("Accessory {state}")));
                    Ok(())
                }
            }
        }
    }
}

async fn require_admin(app: &App) -> anyhow::Result<()> {
    match app.session().restore().await {
        Some(user) if user.is_admin() => Ok(()),
        _ => anyhow::bail!(ADMIN_ACCESS_DENIED),
    }
}

fn inventory<E: AdminEntity>(app: &App) -> AdminInventory<E> {
    AdminInventory::new(Arc::clone(&app.client), app.config.admin_page_size)
}

fn print_inventory<E: AdminEntity>(inventory: &AdminInventory<E>) {
    if let Some(message) = inventory.error() {
        println!("{}", views::failure(message));
    }
    let listing = inventory.listing();
    if listing.items.is_empty() {
        println!("No {} found", E::schema().plural);
        return;
    }
    println!("{:<26}{:<32}IMAGES", "ID", "NAME");
    for item in &listing.items {
        println!(
            "{:<26}{:<32}{}",
            item.id(),
            item.name(),
            item.image_urls().len()
        );
    }
    println!(
        "Page {} of {} ({} total)",
        listing.page, listing.total_pages, listing.total
    );
}

async fn run_inventory<E: AdminEntity>(
    app: &App,
    command: InventoryCommands,
) -> anyhow::Result<()> {
    let noun = E::schema().noun;
    match command {
        InventoryCommands::List { search, page } => {
            let mut inventory = inventory::<E>(app).with_search(search.as_deref().unwrap_or(""));
            inventory.set_page(page).await;
            print_inventory(&inventory);
        }
        InventoryCommands::Search => {
            let delay = Duration::from_millis(app.config.search_debounce_ms);
            let (input, mut terms) = debounced(String::new(), delay);
            tokio::spawn(async move {
                let mut lines = BufReader::new(tokio::io::stdin()).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    input.send(line);
                }
            });
            let mut inventory = inventory::<E>(app);
            while inventory.next_search(&mut terms).await {
                println!("search: \"{}\"", inventory.search());
                print_inventory(&inventory);
            }
        }
        InventoryCommands::Create { draft } => {
            let mut form = EntityForm::<E>::create();
            fill_form(&mut form, &draft).await?;
            save(app, &form).await?;
        }
        InventoryCommands::Update {
            id,
            draft,
            drop_images,
        } => {
            let existing = E::fetch(&app.client, &id)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message(&format!("Failed to load {noun}"))))?;
            let mut form = EntityForm::edit(&existing);
            for url in &drop_images {
                if !form.images_mut().drop_existing(url) {
                    tracing::warn!(url, "image is not attached to this {noun}");
                }
            }
            fill_form(&mut form, &draft).await?;
            save(app, &form).await?;
        }
        InventoryCommands::Delete { id, page } => {
            let mut inventory = inventory::<E>(app);
            inventory.set_page(page).await;
            inventory.delete(&id).await?;
            println!("{}", views::success(&format!("Deleted {noun} {id}")));
            print_inventory(&inventory);
        }
    }
    Ok(())
}

async fn save<E: AdminEntity>(app: &App, form: &EntityForm<E>) -> anyhow::Result<()> {
    match form.submit(&app.client).await {
        Ok(saved) => {
            let verb = match form.mode() {
                FormMode::Create => "Created",
                FormMode::Edit { .. } => "Updated",
            };
            println!(
                "{}",
                views::success(&format!("{verb} {} {} ({})", E::schema().noun, saved.name(), saved.id()))
            );
        }
        Err(e) => println!("{}", views::failure(&e.message)),
    }
    Ok(())
}

async fn fill_form<E: AdminEntity>(form: &mut EntityForm<E>, args: &DraftArgs) -> anyhow::Result<()> {
    if let Some(path) = &args.draft {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read draft {}", path.display()))?;
        let draft: BTreeMap<String, Value> = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse draft {}", path.display()))?;
        apply_draft(form, &draft)?;
    }
    for (key, value) in &args.sets {
        form.set(key, value)?;
    }
    if !args.images.is_empty() {
        let mut uploads = Vec::with_capacity(args.images.len());
        for path in &args.images {
            uploads.push(read_upload(path).await?);
        }
        form.add_images(uploads)?;
    }
    Ok(())
}

fn yaml_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A missing quantity is zero; anything but a whole number that fits `u32`
/// is rejected.
fn color_quantity(value: Option<&Value>) -> Result<u32, FormError> {
    let Some(value) = value else {
        return Ok(0);
    };
    value
        .as_u64()
        .and_then(|q| u32::try_from(q).ok())
        .ok_or_else(|| FormError::InvalidValue {
            label: "Color quantity".to_owned(),
            reason: format!(
                "expected a non-negative whole number, got {}",
                yaml_text(value).unwrap_or_else(|| "a non-scalar value".to_owned())
            ),
        })
}

/// Applies a YAML draft through the form's own input handlers. `variants`
/// and `colors` entries are appended as records.
pub(crate) fn apply_draft<E: AdminEntity>(
    form: &mut EntityForm<E>,
    draft: &BTreeMap<String, Value>,
) -> anyhow::Result<()> {
    for (key, value) in draft {
        match (key.as_str(), value) {
            ("variants", Value::Sequence(records)) => {
                for record in records {
                    let name = record.get("name").and_then(yaml_text).unwrap_or_default();
                    let price = record.get("price").and_then(yaml_text).unwrap_or_default();
                    form.add_variant(&name, &price)?;
                }
            }
            ("colors", Value::Sequence(records)) => {
                for record in records {
                    let name = record.get("name").and_then(yaml_text).unwrap_or_default();
                    form.add_color(&name, color_quantity(record.get("quantity"))?)?;
                }
            }
            (_, Value::Sequence(items)) => {
                form.set_list(key, items.iter().filter_map(yaml_text).collect())?;
            }
            (_, other) => form.set(key, &yaml_text(other).unwrap_or_default())?,
        }
    }
    Ok(())
}

async fn read_upload(path: &Path) -> anyhow::Result<FileUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_owned();
    let mime = mime_from_extension(path)
        .unwrap_or("application/octet-stream")
        .to_owned();
    Ok(FileUpload {
        file_name,
        mime,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(yaml: &str) -> BTreeMap<String, Value> {
        serde_yaml::from_str(yaml).expect("draft fixture should parse")
    }

    #[test]
    fn draft_fills_fields_lists_and_records() {
        let mut form = EntityForm::<Product>::create();
        apply_draft(
            &mut form,
            &draft(
                r"
name: Titan
price.current: 1799
specifications.foldable: true
features: [Belt drive, Torque sensor]
colors:
  - {name: Black, quantity: 4}
variants:
  - {name: Step-through, price: 1749.5}
",
            ),
        )
        .unwrap();

        assert_eq!(form.text("name"), Some("Titan"));
        assert_eq!(form.text("price.current"), Some("1799"));
        assert_eq!(form.flag("specifications.foldable"), Some(true));
        assert_eq!(form.list("features"), ["Belt drive", "Torque sensor"]);
        assert_eq!(form.colors()[0].quantity, 4);
        assert_eq!(form.variants()[0].name, "Step-through");
    }

    #[test]
    fn draft_rejects_bad_color_quantities() {
        for quantity in ["-2", "1.5", "lots"] {
            let mut form = EntityForm::<Product>::create();
            let yaml = format!("colors:\n  - {{name: Black, quantity: {quantity}}}\n");
            let err = apply_draft(&mut form, &draft(&yaml)).unwrap_err();
            assert!(
                matches!(err.downcast_ref::<FormError>(), Some(FormError::InvalidValue { .. })),
                "quantity {quantity} should be rejected"
            );
            assert!(form.colors().is_empty());
        }

        let mut form = EntityForm::<Product>::create();
        apply_draft(&mut form, &draft("colors:\n  - {name: Red}\n")).unwrap();
        assert_eq!(form.colors()[0].quantity, 0);
    }

    #[test]
    fn draft_rejects_unknown_keys() {
        let mut form = EntityForm::<Accessory>::create();
        assert!(apply_draft(&mut form, &draft("wheelSize: 20")).is_err());
    }
}
