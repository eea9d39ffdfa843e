pub mod accessories;
pub mod app_config;
pub mod cart;
pub mod config;
pub mod listing;
pub mod price;
pub mod products;
pub mod users;

pub use accessories::{Accessory, AccessorySpecifications, StockStatus};
pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartItem, CartProduct};
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{Listing, QueryParams, SortKey};
pub use price::{currency_symbol, format_price, normalize_currency, Price};
pub use products::{
    parse_payload_lbs, ColorStock, Product, ProductSpecifications, RatingSummary, Variant,
};
pub use users::{AuthResponse, Role, User};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("validation error: {0}")]
    Validation(String),
}
