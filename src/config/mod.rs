//! Configuration management for Dojo

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::quiz::QuizSettings;
use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Custom theme overrides (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,

    /// Quiz settings applied before command-line flags
    #[serde(default)]
    pub defaults: QuizSettings,

    /// Vim mode enabled
    #[serde(default = "default_vim_mode")]
    pub vim_mode: bool,
}

fn default_vim_mode() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Tokyo Night".to_string(),
            custom_theme: None,
            defaults: QuizSettings::default(),
            vim_mode: default_vim_mode(),
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, writing defaults if it is missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            let config: Self =
                serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")?;
            if let Err(e) = config.defaults.validate() {
                tracing::warn!("Ignoring invalid quiz defaults in config: {}", e);
                return Ok(Self { defaults: QuizSettings::default(), ..config });
            }
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "dojo").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "dojo").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("dojo.log"))
    }

    /// Get the active theme: the custom palette if set, else the named built-in
    pub fn active_theme(&self) -> Theme {
        if let Some(theme) = &self.custom_theme {
            return theme.clone();
        }
        Theme::by_name(&self.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme {:?}, using Tokyo Night", self.theme);
            Theme::tokyo_night()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_tokyo_night_theme() {
        let config = Config::default();
        assert_eq!(config.theme, "Tokyo Night");
    }

    #[test]
    fn default_config_has_vim_mode_enabled() {
        let config = Config::default();
        assert!(config.vim_mode);
    }

    #[test]
    fn config_serializes_to_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("Tokyo Night"));
        assert!(json.contains("auto_advance_delay_ms"));
    }

    #[test]
    fn config_deserializes_from_json() {
        let json = r#"{"theme":"Custom","vim_mode":false,"defaults":{"randomize":true}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.theme, "Custom");
        assert!(!config.vim_mode);
        assert!(config.defaults.randomize);
        assert_eq!(config.defaults.title, "Quiz");
    }

    #[test]
    fn load_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme, "Tokyo Night");
        assert!(path.exists());
    }

    #[test]
    fn load_round_trips_saved_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.defaults.time_limit_seconds = Some(3600);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.defaults.time_limit_seconds, Some(3600));
    }

    #[test]
    fn load_discards_invalid_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"theme":"Tokyo Night","defaults":{"max_questions":0}}"#)
            .unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.defaults.max_questions, None);
    }

    #[test]
    fn active_theme_follows_name_and_custom_palette() {
        let config = Config { theme: "tokyo night".into(), ..Default::default() };
        assert_eq!(config.active_theme().name, "Tokyo Night");

        let config = Config { theme: "Nonexistent".into(), ..Default::default() };
        assert_eq!(config.active_theme().name, "Tokyo Night");

        let custom = Theme { name: "Paper".into(), ..Theme::default() };
        let config = Config { custom_theme: Some(custom), ..Default::default() };
        assert_eq!(config.active_theme().name, "Paper");
    }
}
