//! Price blocks and currency display.
//!
//! The API returns prices in two shapes: a bare number on older cart
//! snapshots, and a `{current, original, currency}` block everywhere else.
//! Both deserialize into [`Price`].

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PriceRepr")]
pub struct Price {
    pub current: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<Decimal>,
    /// Normalized ISO 4217 code, e.g. `"USD"` or `"EUR"`.
    pub currency: String,
}

impl Default for Price {
    fn default() -> Self {
        Self {
            current: Decimal::ZERO,
            original: None,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Price {
    #[must_use]
    pub fn new(current: Decimal, currency: &str) -> Self {
        Self {
            current,
            original: None,
            currency: normalize_currency(currency),
        }
    }

    /// Returns `true` when an original price above the current price is set.
    #[must_use]
    pub fn has_sale(&self) -> bool {
        self.original.is_some_and(|original| original > self.current)
    }

    /// Whole-unit saving shown on product cards, rounded half away from zero.
    ///
    /// Zero when the product is not on sale.
    #[must_use]
    pub fn discount_amount(&self) -> i64 {
        match self.original {
            Some(original) if original > self.current => (original - self.current)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
                .unwrap_or(0),
            _ => 0,
        }
    }

    #[must_use]
    pub fn display(&self) -> String {
        format_price(self.current, &self.currency)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Amount(Decimal),
    Block {
        current: Decimal,
        #[serde(default)]
        original: Option<Decimal>,
        #[serde(default)]
        currency: Option<String>,
    },
}

impl From<PriceRepr> for Price {
    fn from(repr: PriceRepr) -> Self {
        match repr {
            PriceRepr::Amount(current) => Price {
                current,
                ..Price::default()
            },
            PriceRepr::Block {
                current,
                original,
                currency,
            } => Price {
                current,
                original,
                currency: normalize_currency(currency.as_deref().unwrap_or(DEFAULT_CURRENCY)),
            },
        }
    }
}

/// Upper-cases a currency code and folds the legacy `"EURO"` spelling into `"EUR"`.
///
/// An empty code falls back to `"USD"`.
#[must_use]
pub fn normalize_currency(currency: &str) -> String {
    let upper = currency.trim().to_uppercase();
    match upper.as_str() {
        "" => DEFAULT_CURRENCY.to_string(),
        "EURO" => "EUR".to_string(),
        _ => upper,
    }
}

/// Formats an amount with two decimals and the currency's symbol.
///
/// Unknown currencies are shown as `"GBP 12.00"`.
#[must_use]
pub fn format_price(amount: Decimal, currency: &str) -> String {
    let code = normalize_currency(currency);
    let amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{amount:.2}");
    match code.as_str() {
        "EUR" => format!("\u{20ac}{formatted}"),
        "USD" => format!("${formatted}"),
        _ => format!("{code} {formatted}"),
    }
}

#[must_use]
pub fn currency_symbol(currency: &str) -> String {
    let code = normalize_currency(currency);
    match code.as_str() {
        "EUR" => "\u{20ac}".to_string(),
        "USD" => "$".to_string(),
        _ => code,
    }
}
