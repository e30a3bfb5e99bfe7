use serde::{Deserialize, Serialize};

/// REST backend location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Token storage and role polling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// How often the role flag is recomputed from the stored token.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// JSON file backing the cookie jar and local storage.
    /// Empty keeps the session in memory only.
    #[serde(default = "default_store_path")]
    pub store_path: String,
    #[serde(default = "default_access_cookie_days")]
    pub access_cookie_days: i64,
    #[serde(default = "default_refresh_cookie_days")]
    pub refresh_cookie_days: i64,
    /// Address the OAuth provider sends the user back to with `?token=`.
    #[serde(default = "default_oauth_redirect_uri")]
    pub oauth_redirect_uri: String,
    #[serde(default)]
    pub secure_cookies: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            store_path: default_store_path(),
            access_cookie_days: default_access_cookie_days(),
            refresh_cookie_days: default_refresh_cookie_days(),
            oauth_redirect_uri: default_oauth_redirect_uri(),
            secure_cookies: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
///
/// Every section and field has a default so that a missing or partial
/// file still produces a usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_store_path() -> String {
    "session.json".to_string()
}

fn default_access_cookie_days() -> i64 {
    7
}

fn default_refresh_cookie_days() -> i64 {
    30
}

fn default_oauth_redirect_uri() -> String {
    "https://study-with-me.site/token".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserialize_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.session.poll_interval_ms, 2000);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.session.access_cookie_days, 7);
        assert_eq!(config.session.refresh_cookie_days, 30);
    }

    #[test]
    fn deserialize_partial_toml_defaults_missing_fields() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://api.study-with-me.site"

            [session]
            poll_interval_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.study-with-me.site");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.session.poll_interval_ms, 500);
        assert_eq!(config.session.store_path, "session.json");
        assert!(!config.session.secure_cookies);
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn deserialize_full_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://127.0.0.1:9000"
            timeout_secs = 5

            [session]
            poll_interval_ms = 1000
            store_path = ""
            access_cookie_days = 1
            refresh_cookie_days = 2
            oauth_redirect_uri = "http://localhost:3000/token"
            secure_cookies = true

            [search]
            debounce_ms = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.session.store_path, "");
        assert_eq!(config.session.refresh_cookie_days, 2);
        assert!(config.session.secure_cookies);
        assert_eq!(config.search.debounce_ms, 50);
    }
}
