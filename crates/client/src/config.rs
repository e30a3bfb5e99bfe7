use shared_types::AppConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();
static DEFAULT: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Read `.env` and `config.toml`, apply environment overrides, and store the
/// result in the global `OnceLock`. Only the first call has effect.
///
/// A missing or unparseable file falls back to defaults.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        dotenvy::dotenv().ok();
        let mut config = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => parse_config(&contents),
            Err(e) => {
                tracing::warn!(path = CONFIG_PATH, error = %e, "config file not found, using defaults");
                AppConfig::default()
            }
        };
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        tracing::info!(
            base_url = %config.api.base_url,
            poll_interval_ms = config.session.poll_interval_ms,
            "configuration loaded"
        );
        config
    })
}

/// Get the loaded configuration, or defaults if `load_config()` hasn't run.
pub fn app_config() -> &'static AppConfig {
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(path = CONFIG_PATH, error = %e, "failed to parse config, using defaults");
        AppConfig::default()
    })
}

/// `API_BASE_URL` and `SESSION_STORE_PATH` win over the file.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup("API_BASE_URL").filter(|v| !v.trim().is_empty()) {
        config.api.base_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(path) = lookup("SESSION_STORE_PATH") {
        config.session.store_path = path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broken_file_falls_back_to_defaults() {
        assert_eq!(parse_config("[api\nbase_url = "), AppConfig::default());
    }

    #[test]
    fn env_overrides_win() {
        let mut config = parse_config("[api]\nbase_url = \"http://file\"\n");
        apply_env_overrides(&mut config, |key| match key {
            "API_BASE_URL" => Some("https://api.example.com/".to_string()),
            "SESSION_STORE_PATH" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.session.store_path, "");
    }

    #[test]
    fn blank_base_url_override_is_ignored() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, |key| (key == "API_BASE_URL").then(|| "  ".to_string()));
        assert_eq!(config.api.base_url, AppConfig::default().api.base_url);
    }
}
