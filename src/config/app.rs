//! Application configuration (TOML)
//!
//! One flat file with a few sections. Every field has a serde default so a
//! partial or empty file still loads; out-of-range values are clamped on load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::board::BoardLayout;
use crate::color::HexColor;
use crate::constants::config::{APP_DIR, ENV_DATA_DIR, ENV_LOG_LEVEL, FILENAME};
use crate::constants::export::{DEFAULT_BACKGROUND, MAX_SCALE, MIN_SCALE};
use crate::constants::images::DEFAULT_MAX_BYTES;
use crate::export::{ExportOptions, default_export_dir};
use crate::input::InputMode;
use crate::storage::default_data_dir;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub input_mode: InputMode,
    #[serde(default)]
    pub board: BoardLayout,
    #[serde(default)]
    pub pool: PoolSettings,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub images: ImageSettings,
}

/// Initial contents of the available player pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSettings {
    #[serde(default = "default_players")]
    pub players: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_background")]
    pub background: String,
    /// Fontconfig font name, empty for the system default
    #[serde(default)]
    pub font: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSettings {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_players() -> Vec<String> {
    [
        "BLACK", "FNX", "GUIME", "ERICKING", "PROZIN", "JUCA", "THEUS7", "PITBULL", "NANDO9",
        "BYTE33", "HONEY", "WLIU", "LOST", "CAUAN", "COACH BRN", "COACH PUTSGRILO",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_scale() -> f32 {
    MIN_SCALE
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_BYTES
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self { players: default_players() }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            background: default_background(),
            font: String::new(),
            directory: None,
        }
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self { max_bytes: default_max_bytes() }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            input_mode: InputMode::default(),
            board: BoardLayout::default(),
            pool: PoolSettings::default(),
            export: ExportSettings::default(),
            storage: StorageSettings::default(),
            images: ImageSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push(FILENAME);
        path
    }

    /// Load from `path`, writing a default file first if none exists
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Config file not found, creating default config");
            let config = AppConfig::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML from {:?}", path))?;
        config.validate_and_clamp();
        info!(path = %path.display(), players = config.pool.players.len(), "Loaded config");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    pub fn validate_and_clamp(&mut self) {
        let level = self.log_level.trim().to_ascii_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            self.log_level = level;
        } else {
            warn!(log_level = %self.log_level, "Unknown log_level, using info");
            self.log_level = default_log_level();
        }

        let requested = self.board;
        if self.board.clamp() {
            warn!(
                starters = requested.starters,
                reserves = requested.reserves,
                clamped_starters = self.board.starters,
                clamped_reserves = self.board.reserves,
                "Board layout out of range, clamping"
            );
        }

        if !self.export.scale.is_finite() || self.export.scale < MIN_SCALE {
            warn!(scale = self.export.scale, min = MIN_SCALE, "export scale below minimum, clamping");
            self.export.scale = MIN_SCALE;
        } else if self.export.scale > MAX_SCALE {
            warn!(scale = self.export.scale, max = MAX_SCALE, "export scale exceeds maximum, clamping");
            self.export.scale = MAX_SCALE;
        }

        if HexColor::parse(&self.export.background).is_none() {
            warn!(background = %self.export.background, "Invalid export background color, using default");
            self.export.background = default_background();
        }

        if self.images.max_bytes == 0 {
            warn!("images.max_bytes is zero, using default");
            self.images.max_bytes = default_max_bytes();
        }
    }

    /// Apply `LOG_LEVEL` and `ROSTER_BOARD_DATA_DIR` from the environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|var| std::env::var(var).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|s| !s.trim().is_empty()) {
            self.log_level = level;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|s| !s.trim().is_empty()) {
            self.storage.directory = Some(PathBuf::from(dir));
        }
        self.validate_and_clamp();
    }

    pub fn data_dir(&self) -> PathBuf {
        self.storage.directory.clone().unwrap_or_else(default_data_dir)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export.directory.clone().unwrap_or_else(default_export_dir)
    }

    pub fn export_options(&self) -> ExportOptions {
        let background = HexColor::parse(&self.export.background)
            .or_else(|| HexColor::parse(DEFAULT_BACKGROUND))
            .unwrap_or(crate::color::palette::ZINC_950);
        ExportOptions::new(self.export.scale, background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("roster-board-config-{tag}-{}", std::process::id()))
            .join(FILENAME)
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.board, BoardLayout { starters: 5, reserves: 2 });
        assert_eq!(config.pool.players.len(), 16);
        assert_eq!(config.export.scale, 2.0);
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            input_mode = "tap"

            [board]
            reserves = 0

            [pool]
            players = ["BLACK"]
            "#,
        )
        .unwrap();
        assert_eq!(config.input_mode, InputMode::TapSelect);
        assert_eq!(config.board, BoardLayout { starters: 5, reserves: 0 });
        assert_eq!(config.pool.players, vec!["BLACK".to_string()]);
        assert_eq!(config.images.max_bytes, DEFAULT_MAX_BYTES);
    }

    #[test]
    fn test_clamps_out_of_range() {
        let mut config: AppConfig = toml::from_str(
            r#"
            log_level = "LOUD"
            [board]
            starters = 0
            reserves = 40
            [export]
            scale = 1.0
            background = "not a color"
            [images]
            max_bytes = 0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.board, BoardLayout { starters: 1, reserves: 10 });
        assert_eq!(config.export.scale, MIN_SCALE);
        assert_eq!(config.export.background, DEFAULT_BACKGROUND);
        assert_eq!(config.images.max_bytes, DEFAULT_MAX_BYTES);

        config.export.scale = 9.0;
        config.validate_and_clamp();
        assert_eq!(config.export.scale, MAX_SCALE);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides_from(|var| match var {
            ENV_LOG_LEVEL => Some("DEBUG".into()),
            ENV_DATA_DIR => Some("/tmp/rosters".into()),
            _ => None,
        });
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/rosters"));

        let mut untouched = AppConfig::default();
        untouched.apply_overrides_from(|_| None);
        assert_eq!(untouched, AppConfig::default());
    }

    #[test]
    fn test_load_creates_default_file() {
        let path = temp_path("create");
        let _ = fs::remove_file(&path);
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        let reloaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let path = temp_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "board = [").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_export_options_from_config() {
        let mut config = AppConfig::default();
        config.export.background = "#FF0000".into();
        config.export.scale = 3.0;
        let options = config.export_options();
        assert_eq!(options.scale(), 3.0);
        assert_eq!(options.background, HexColor::rgb(0xFF, 0, 0));
    }
}
