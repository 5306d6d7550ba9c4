//! Configuration file support for inkboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/inkboard/config.toml`. Settings include tool defaults, surface
//! sizing, zoom bounds, snapshot compression, and save/export locations.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{
    DrawingConfig, ExportConfig, HistoryConfig, StorageConfig, SurfaceConfig, UiConfig,
    ViewportConfig,
};

use crate::util::expand_tilde;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#6C7D47"
/// default_width = 3.0
///
/// [viewport]
/// min_scale = 0.5
/// max_scale = 2.0
///
/// [storage]
/// directory = "~/.local/share/inkboard/boards"
///
/// [ui]
/// default_board_name = "Untitled Board"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Tool defaults (color, width, eraser size)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Surface sizing inside the host container
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Presentation zoom bounds and steps
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// Snapshot history tuning
    #[serde(default)]
    pub history: HistoryConfig,

    /// Local record store used by save
    #[serde(default)]
    pub storage: StorageConfig,

    /// File export location
    #[serde(default)]
    pub export: ExportConfig,

    /// UI collaborator preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_width`: 1.0 - 100.0
    /// - `eraser_multiplier`: 1.0 - 10.0
    /// - `padding`: 0 - 400, `min_size`: 1 - 64
    /// - `min_scale`: 0.1 - 1.0, `max_scale`: 1.0 - 8.0
    /// - zoom factors: in > 1.0, out in (0.0, 1.0)
    /// - `compression_level`: 0 - 9
    pub fn validate_and_clamp(&mut self) {
        if !(1.0..=100.0).contains(&self.drawing.default_width) {
            log::warn!(
                "Invalid default_width {:.1}, clamping to 1.0-100.0 range",
                self.drawing.default_width
            );
            // NaN fails `contains` and survives `clamp`, so replace it outright.
            self.drawing.default_width = if self.drawing.default_width.is_nan() {
                3.0
            } else {
                self.drawing.default_width.clamp(1.0, 100.0)
            };
        }

        if !(1.0..=10.0).contains(&self.drawing.eraser_multiplier) {
            log::warn!(
                "Invalid eraser_multiplier {:.1}, clamping to 1.0-10.0 range",
                self.drawing.eraser_multiplier
            );
            self.drawing.eraser_multiplier = if self.drawing.eraser_multiplier.is_nan() {
                3.0
            } else {
                self.drawing.eraser_multiplier.clamp(1.0, 10.0)
            };
        }

        if self.surface.padding > 400 {
            log::warn!(
                "Invalid surface padding {}, clamping to 0-400 range",
                self.surface.padding
            );
            self.surface.padding = 400;
        }

        if !(1..=64).contains(&self.surface.min_size) {
            log::warn!(
                "Invalid surface min_size {}, clamping to 1-64 range",
                self.surface.min_size
            );
            self.surface.min_size = self.surface.min_size.clamp(1, 64);
        }

        if !(0.1..=1.0).contains(&self.viewport.min_scale) {
            log::warn!(
                "Invalid min_scale {:.2}, clamping to 0.1-1.0 range",
                self.viewport.min_scale
            );
            self.viewport.min_scale = if self.viewport.min_scale.is_nan() {
                0.5
            } else {
                self.viewport.min_scale.clamp(0.1, 1.0)
            };
        }

        if !(1.0..=8.0).contains(&self.viewport.max_scale) {
            log::warn!(
                "Invalid max_scale {:.2}, clamping to 1.0-8.0 range",
                self.viewport.max_scale
            );
            self.viewport.max_scale = if self.viewport.max_scale.is_nan() {
                2.0
            } else {
                self.viewport.max_scale.clamp(1.0, 8.0)
            };
        }

        if !(self.viewport.zoom_in_factor > 1.0 && self.viewport.zoom_in_factor.is_finite()) {
            log::warn!(
                "Invalid zoom_in_factor {:.2}, falling back to 1.1",
                self.viewport.zoom_in_factor
            );
            self.viewport.zoom_in_factor = 1.1;
        }

        if !(self.viewport.zoom_out_factor > 0.0 && self.viewport.zoom_out_factor < 1.0) {
            log::warn!(
                "Invalid zoom_out_factor {:.2}, falling back to 0.9",
                self.viewport.zoom_out_factor
            );
            self.viewport.zoom_out_factor = 0.9;
        }

        if self.history.compression_level > 9 {
            log::warn!(
                "Invalid compression_level {}, clamping to 0-9 range",
                self.history.compression_level
            );
            self.history.compression_level = 9;
        }

        if self.storage.key_prefix.is_empty()
            || self
                .storage
                .key_prefix
                .chars()
                .any(|c| c == '/' || c == '\\' || c.is_control())
        {
            log::warn!(
                "Invalid storage key_prefix '{}', falling back to 'whiteboard_'",
                self.storage.key_prefix
            );
            self.storage.key_prefix = "whiteboard_".to_string();
        }

        if self.ui.default_board_name.is_empty() {
            log::warn!("Empty default_board_name, falling back to 'Untitled Board'");
            self.ui.default_board_name = types::default_board_name();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/inkboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("inkboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path, or returns defaults if it does not exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Directory the save control writes records into.
    pub fn storage_directory(&self) -> PathBuf {
        match &self.storage.directory {
            Some(dir) => expand_tilde(dir),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("inkboard")
                .join("boards"),
        }
    }

    /// Directory the export control writes PNG files into.
    pub fn export_directory(&self) -> PathBuf {
        match &self.export.directory {
            Some(dir) => expand_tilde(dir),
            None => dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Inkboard"),
        }
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_whiteboard_behaviour() {
        let config = Config::default();
        assert_eq!(config.drawing.default_width, 3.0);
        assert_eq!(config.drawing.default_color.to_color().to_hex(), "#6C7D47");
        assert_eq!(config.surface.padding, 40);
        assert_eq!(config.viewport.min_scale, 0.5);
        assert_eq!(config.viewport.max_scale, 2.0);
        assert_eq!(config.ui.default_board_name, "Untitled Board");
        assert_eq!(config.ui.status_revert_ms, 2000);
        assert_eq!(config.storage.key_prefix, "whiteboard_");
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_fields() {
        let config: Config = toml::from_str(
            r##"
            [drawing]
            default_color = "#112233"

            [ui]
            confirm_clear = false
            "##,
        )
        .unwrap();
        assert_eq!(config.drawing.default_color.to_color().to_hex(), "#112233");
        assert_eq!(config.drawing.default_width, 3.0);
        assert!(!config.ui.confirm_clear);
        assert_eq!(config.viewport.zoom_in_factor, 1.1);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.drawing.default_width = 500.0;
        config.viewport.min_scale = 0.0;
        config.viewport.zoom_out_factor = 1.5;
        config.history.compression_level = 42;
        config.storage.key_prefix = "a/b".into();
        config.validate_and_clamp();

        assert_eq!(config.drawing.default_width, 100.0);
        assert_eq!(config.viewport.min_scale, 0.1);
        assert_eq!(config.viewport.zoom_out_factor, 0.9);
        assert_eq!(config.history.compression_level, 9);
        assert_eq!(config.storage.key_prefix, "whiteboard_");
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.surface.padding, 40);
    }

    #[test]
    fn load_from_reads_and_validates() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[surface]\npadding = 1000\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.surface.padding, 400);
    }

    #[test]
    fn explicit_directories_expand_tilde() {
        let mut config = Config::default();
        config.export.directory = Some("/tmp/exports".into());
        assert_eq!(config.export_directory(), PathBuf::from("/tmp/exports"));
        config.storage.directory = Some("~/boards".into());
        assert!(!config.storage_directory().to_string_lossy().starts_with('~'));
    }
}
