use serde::{Deserialize, Serialize};

/// One page of a listing call.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    /// Total number of matches across all pages.
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
}

impl<T> Listing<T> {
    /// Listing shown after a failed fetch.
    #[must_use]
    pub fn empty(page: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
            total_pages: 1,
        }
    }

    /// Builds a listing, deriving `total_pages` from `total / limit` when the
    /// server did not report it.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32, total_pages: Option<u32>) -> Self {
        let total_pages = total_pages.unwrap_or_else(|| pages_for(total, limit)).max(1);
        Self {
            items,
            total,
            page,
            total_pages,
        }
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

fn pages_for(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
}

/// Flat, ordered query-parameter set for a listing call. Keys may repeat
/// (multi-select facets are sent as repeated parameters).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) {
        self.0.push((key.to_string(), value.to_string()));
    }

    /// First value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// `page` parameter, 1 when absent or unparsable.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.get("page")
            .and_then(|p| p.parse().ok())
            .unwrap_or(1)
    }

    #[must_use]
    pub fn limit(&self) -> Option<u32> {
        self.get("limit").and_then(|l| l.parse().ok())
    }

    #[must_use]
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Listing sort order accepted by the API's `sort` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "featured")]
    Featured,
    #[serde(rename = "priceLow")]
    PriceLow,
    #[serde(rename = "priceHigh")]
    PriceHigh,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Featured, SortKey::PriceLow, SortKey::PriceHigh];

    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "priceLow",
            SortKey::PriceHigh => "priceHigh",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::PriceLow => "Price (Low to high)",
            SortKey::PriceHigh => "Price (High to low)",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_param().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown sort key \"{s}\" (expected featured, priceLow or priceHigh)"))
    }
}
