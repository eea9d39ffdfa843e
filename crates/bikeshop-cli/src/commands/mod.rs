//! Command handlers for the CLI.
//!
//! Each handler builds the store it needs from the shared [`App`], runs one
//! action, and prints the matching view.

pub(crate) mod account;
pub(crate) mod admin;
pub(crate) mod cart;
pub(crate) mod catalog;

use std::io::IsTerminal;
use std::sync::Arc;

use bikeshop_client::{ApiClient, FileTokenStore, LOADING_MESSAGE};
use bikeshop_core::AppConfig;
use bikeshop_storefront::{CartStore, CatalogService, SessionStore};

/// Shared state for one CLI invocation.
pub(crate) struct App {
    pub(crate) config: AppConfig,
    pub(crate) client: Arc<ApiClient>,
}

impl App {
    pub(crate) fn new(config: AppConfig) -> anyhow::Result<Self> {
        let tokens = FileTokenStore::open(&config.session_path);
        let client = ApiClient::new(
            &config.api_base_url,
            config.http_timeout_secs,
            &config.user_agent,
            Arc::new(tokens),
        )
        .map_err(|e| anyhow::anyhow!("failed to build API client: {e}"))?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    pub(crate) fn session(&self) -> SessionStore {
        SessionStore::new(Arc::clone(&self.client))
    }

    pub(crate) fn cart(&self) -> CartStore {
        CartStore::new(Arc::clone(&self.client))
    }

    pub(crate) fn catalog(&self) -> CatalogService {
        CatalogService::new(Arc::clone(&self.client))
    }

    /// Shows the loading message on stderr while any request is in flight.
    /// Does nothing when stderr is not a terminal.
    pub(crate) fn spawn_loading_indicator(&self) {
        if !std::io::stderr().is_terminal() {
            return;
        }
        let mut pending = self.client.loading().subscribe();
        tokio::spawn(async move {
            let mut shown = false;
            while pending.changed().await.is_ok() {
                let busy = *pending.borrow_and_update() > 0;
                if busy && !shown {
                    eprint!("{LOADING_MESSAGE}");
                } else if !busy && shown {
                    eprint!("\r\x1b[K");
                }
                shown = busy;
            }
        });
    }
}

/// Parses a `key=value` argument.
pub(crate) fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got \"{raw}\""))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in \"{raw}\""));
    }
    Ok((key.to_owned(), value.to_owned()))
}
