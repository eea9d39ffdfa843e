use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the storefront REST API, without a trailing slash.
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    /// File that holds the persisted bearer token and user profile.
    pub session_path: PathBuf,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// Quiet period before a search-triggered listing fetch is issued.
    pub search_debounce_ms: u64,
    pub products_page_size: u32,
    pub accessories_page_size: u32,
    pub admin_page_size: u32,
}
