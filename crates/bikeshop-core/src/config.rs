use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the lookup is injected so tests can drive it
/// from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_page_size = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let size = parse_u32(var, default)?;
        if size == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "page size must be at least 1".to_string(),
            });
        }
        Ok(size)
    };

    let api_base_url = or_default("BIKESHOP_API_URL", "http://localhost:5000/api");
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(ConfigError::Validation(format!(
            "BIKESHOP_API_URL must be an http(s) URL, got \"{api_base_url}\""
        )));
    }
    let api_base_url = api_base_url.trim_end_matches('/').to_string();

    let env = parse_environment(&or_default("BIKESHOP_ENV", "development"));
    let log_level = or_default("BIKESHOP_LOG_LEVEL", "info");
    let session_path = PathBuf::from(or_default(
        "BIKESHOP_SESSION_PATH",
        "./.bikeshop/session.json",
    ));

    let http_timeout_secs = parse_u64("BIKESHOP_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BIKESHOP_USER_AGENT", "bikeshop/0.1 (storefront)");
    let search_debounce_ms = parse_u64("BIKESHOP_SEARCH_DEBOUNCE_MS", "500")?;

    let products_page_size = parse_page_size("BIKESHOP_PRODUCTS_PAGE_SIZE", "12")?;
    let accessories_page_size = parse_page_size("BIKESHOP_ACCESSORIES_PAGE_SIZE", "6")?;
    let admin_page_size = parse_page_size("BIKESHOP_ADMIN_PAGE_SIZE", "6")?;

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        session_path,
        http_timeout_secs,
        user_agent,
        search_debounce_ms,
        products_page_size,
        accessories_page_size,
        admin_page_size,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;
    use std::path::PathBuf;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_uses_defaults_for_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let config = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");

        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.log_level, "info");
        assert_eq!(
            config.session_path,
            PathBuf::from("./.bikeshop/session.json")
        );
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.search_debounce_ms, 500);
        assert_eq!(config.products_page_size, 12);
        assert_eq!(config.accessories_page_size, 6);
        assert_eq!(config.admin_page_size, 6);
    }

    #[test]
    fn build_app_config_strips_trailing_slash_from_api_url() {
        let mut map = HashMap::new();
        map.insert("BIKESHOP_API_URL", "https://shop.example.com/api/");
        let config = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(config.api_base_url, "https://shop.example.com/api");
    }

    #[test]
    fn build_app_config_rejects_non_http_api_url() {
        let mut map = HashMap::new();
        map.insert("BIKESHOP_API_URL", "localhost:5000");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(_))),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("BIKESHOP_HTTP_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIKESHOP_HTTP_TIMEOUT_SECS"),
            "expected InvalidEnvVar(BIKESHOP_HTTP_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_page_size() {
        let mut map = HashMap::new();
        map.insert("BIKESHOP_PRODUCTS_PAGE_SIZE", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIKESHOP_PRODUCTS_PAGE_SIZE"),
            "expected InvalidEnvVar(BIKESHOP_PRODUCTS_PAGE_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = HashMap::new();
        map.insert("BIKESHOP_ENV", "production");
        map.insert("BIKESHOP_SESSION_PATH", "/tmp/shop-session.json");
        map.insert("BIKESHOP_SEARCH_DEBOUNCE_MS", "250");
        map.insert("BIKESHOP_ADMIN_PAGE_SIZE", "20");
        let config = build_app_config(lookup_from_map(&map)).unwrap();

        assert_eq!(config.env, Environment::Production);
        assert_eq!(config.session_path, PathBuf::from("/tmp/shop-session.json"));
        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.admin_page_size, 20);
    }
}
