//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool parameters a fresh whiteboard session starts with.
/// The color and width controls change these at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default pen color - a hex string like `"#6C7D47"` or an RGB array
    #[serde(default)]
    pub default_color: ColorSpec,

    /// Default stroke width in pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_width")]
    pub default_width: f64,

    /// Eraser width relative to the stroke width (valid range: 1.0 - 10.0)
    #[serde(default = "default_eraser_multiplier")]
    pub eraser_multiplier: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: ColorSpec::default(),
            default_width: default_width(),
            eraser_multiplier: default_eraser_multiplier(),
        }
    }
}

/// Surface sizing settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceConfig {
    /// Pixels subtracted from the container on each axis (valid range: 0 - 400)
    #[serde(default = "default_padding")]
    pub padding: u32,

    /// Smallest surface edge allowed when the container is too small (valid range: 1 - 64)
    #[serde(default = "default_min_size")]
    pub min_size: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            padding: default_padding(),
            min_size: default_min_size(),
        }
    }
}

/// Presentation zoom settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ViewportConfig {
    /// Lowest zoom scale (valid range: 0.1 - 1.0)
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,

    /// Highest zoom scale (valid range: 1.0 - 8.0)
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,

    /// Factor applied by the zoom-in control (must be > 1.0)
    #[serde(default = "default_zoom_in_factor")]
    pub zoom_in_factor: f64,

    /// Factor applied by the zoom-out control (must be between 0.0 and 1.0)
    #[serde(default = "default_zoom_out_factor")]
    pub zoom_out_factor: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            zoom_in_factor: default_zoom_in_factor(),
            zoom_out_factor: default_zoom_out_factor(),
        }
    }
}

/// Undo/redo history settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// DEFLATE level used for snapshots (0 = store, 9 = smallest; valid range: 0 - 9)
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            compression_level: default_compression_level(),
        }
    }
}

/// Local record store used by the save control.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StorageConfig {
    /// Directory holding saved records (defaults to `<data dir>/inkboard/boards`)
    #[serde(default)]
    pub directory: Option<String>,

    /// Prefix of every record key; the unix-millisecond save time follows it
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: None,
            key_prefix: default_key_prefix(),
        }
    }
}

/// File export settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory exports are written to (defaults to `<pictures dir>/Inkboard`)
    #[serde(default)]
    pub directory: Option<String>,
}

/// UI collaborator preferences.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UiConfig {
    /// Board name used when the name field is empty
    #[serde(default = "default_board_name")]
    pub default_board_name: String,

    /// How long a transient status message stays before reverting (milliseconds)
    #[serde(default = "default_status_revert_ms")]
    pub status_revert_ms: u64,

    /// Ask for confirmation before clearing the board
    #[serde(default = "default_confirm_clear")]
    pub confirm_clear: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_board_name: default_board_name(),
            status_revert_ms: default_status_revert_ms(),
            confirm_clear: default_confirm_clear(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_width() -> f64 {
    3.0
}

fn default_eraser_multiplier() -> f64 {
    3.0
}

fn default_padding() -> u32 {
    40
}

fn default_min_size() -> u32 {
    1
}

fn default_min_scale() -> f64 {
    0.5
}

fn default_max_scale() -> f64 {
    2.0
}

fn default_zoom_in_factor() -> f64 {
    1.1
}

fn default_zoom_out_factor() -> f64 {
    0.9
}

fn default_compression_level() -> u32 {
    1
}

fn default_key_prefix() -> String {
    "whiteboard_".to_string()
}

pub(crate) fn default_board_name() -> String {
    "Untitled Board".to_string()
}

fn default_status_revert_ms() -> u64 {
    2000
}

fn default_confirm_clear() -> bool {
    true
}
