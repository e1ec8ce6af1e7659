//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$MAILTRIAGE_CONFIG` (environment variable)
//! 2. `~/.config/mailtriage/config.toml` (Linux/macOS)
//!    `%APPDATA%\mailtriage\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::model::FolderKey;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Display and layout settings.
    pub display: DisplayConfig,
    /// Compose form defaults.
    pub compose: ComposeConfig,
    /// Where the initial message set comes from.
    pub seed: SeedConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// `strftime` format string for dates in the message list.
    pub date_format: String,
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Folder shown on startup.
    pub default_folder: String,
}

/// Display and layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Color theme: "dark" or "light".
    pub theme: String,
    /// Show the folder sidebar on startup.
    pub show_sidebar: bool,
    /// Show the message preview pane on startup.
    pub show_preview: bool,
}

/// Compose form defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Pre-filled sender address for new messages.
    pub default_sender: Option<String>,
}

/// Seed source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// JSON seed file. The built-in demo set is used when unset.
    pub path: Option<PathBuf>,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            cache_dir: None,
            log_level: "warn".to_string(),
            default_folder: "Inbox1".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            show_sidebar: true,
            show_preview: true,
        }
    }
}

impl GeneralConfig {
    /// The startup folder as a key.
    pub fn default_folder_key(&self) -> FolderKey {
        FolderKey::new(self.default_folder.trim())
    }

    /// `date_format`, or the default if it contains an invalid specifier.
    pub fn checked_date_format(&self) -> String {
        let invalid = StrftimeItems::new(&self.date_format).any(|item| item == Item::Error);
        if invalid {
            tracing::warn!(format = %self.date_format, "Invalid date format, using default");
            Self::default().date_format
        } else {
            self.date_format.clone()
        }
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var("MAILTRIAGE_CONFIG") {
        return Some(PathBuf::from(env_path));
    }
    dirs::config_dir().map(|d| d.join("mailtriage").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailtriage")
}

/// Return the log file path.
pub fn log_file_path(config: &Config) -> PathBuf {
    cache_dir(config).join("mailtriage.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.general.default_folder, "Inbox1");
        assert_eq!(cfg.general.log_level, "warn");
        assert_eq!(cfg.display.theme, "dark");
        assert!(cfg.display.show_sidebar);
        assert!(cfg.compose.default_sender.is_none());
        assert!(cfg.seed.path.is_none());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let mut cfg = Config::default();
        cfg.compose.default_sender = Some("me@example.com".to_string());
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.general.default_folder, cfg.general.default_folder);
        assert_eq!(parsed.compose.default_sender, cfg.compose.default_sender);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[general]
default_folder = "Drafts2"

[display]
theme = "light"
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.general.default_folder_key(), "Drafts2");
        assert_eq!(cfg.display.theme, "light");
        // Other fields use defaults
        assert_eq!(cfg.general.date_format, "%Y-%m-%d");
        assert!(cfg.display.show_preview);
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let mut cfg = Config::default();
        cfg.general.date_format = "%d/%m %Q".to_string();
        assert_eq!(cfg.general.checked_date_format(), "%Y-%m-%d");
        cfg.general.date_format = "%d/%m".to_string();
        assert_eq!(cfg.general.checked_date_format(), "%d/%m");
    }

    #[test]
    fn test_log_file_in_cache_dir() {
        let mut cfg = Config::default();
        cfg.general.cache_dir = Some(PathBuf::from("/tmp/mt"));
        let path = log_file_path(&cfg);
        assert_eq!(path, PathBuf::from("/tmp/mt/mailtriage.log"));
        // The file appender is opened from these two parts.
        assert_eq!(path.parent(), Some(std::path::Path::new("/tmp/mt")));
        assert_eq!(path.file_name().unwrap_or_default(), "mailtriage.log");
    }
}
