mod defaults;


use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::PluginBaseError;
use crate::locale::Locale;
use defaults::*;

/// Top-level configuration for a message catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub messages: MessagesConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the language file lives and how lookups are formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    #[serde(default = "default_language_file")]
    pub language_file: String,
    #[serde(default = "default_locale")]
    pub locale: Locale,
    #[serde(default)]
    pub format: StoreFormat,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            language_file: default_language_file(),
            locale: default_locale(),
            format: StoreFormat::default(),
        }
    }
}

impl MessagesConfig {
    /// Language file path with `~` expanded.
    pub fn language_path(&self) -> PathBuf {
        PathBuf::from(shellexpand(&self.language_file))
    }
}

/// On-disk format of the language file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    /// Nested TOML tables (default, easiest to hand-edit).
    #[default]
    Toml,
    /// Nested JSON objects.
    Json,
}

impl StoreFormat {
    /// Human-readable name for display.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// Theme definition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Path to a theme definition document. A missing file is not an error.
    #[serde(default = "default_theme_file")]
    pub file: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            file: default_theme_file(),
        }
    }
}

/// Logging settings, used when `RUST_LOG` is unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, PluginBaseError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        PluginBaseError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| PluginBaseError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
