use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GeoInputError, Result};

/// Root application configuration, loaded from `~/.config/geoinput/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub widget: WidgetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Per-widget settings. Fixed once a widget is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub field_name: String,
    pub placeholder_text: String,
    pub debounce_ms: u64,
    pub min_query_chars: usize,
    pub result_limit: usize,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.geoapify.com".to_string(),
            api_key: None,
            api_key_env: "GEOAPIFY_API_KEY".to_string(),
            timeout_secs: 10,
            user_agent: "geoinput/0.1".to_string(),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            field_name: "address".to_string(),
            placeholder_text: "Enter an address here".to_string(),
            debounce_ms: 300,
            min_query_chars: 3,
            result_limit: 5,
        }
    }
}

impl WidgetConfig {
    pub fn new(field_name: impl Into<String>, placeholder_text: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            placeholder_text: placeholder_text.into(),
            ..Self::default()
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl ApiConfig {
    /// The literal `api_key` wins; otherwise the variable named by `api_key_env`.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            return Ok(key.to_string());
        }
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(GeoInputError::Config(format!(
                "no API key: set api.api_key or ${}",
                self.api_key_env
            ))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/geoinput/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("GEOINPUT_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("geoinput")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        Self::load_from(&path)
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the standard path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }
}
