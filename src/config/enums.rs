//! Configuration enum types.

use crate::draw::{Color, color::OLIVE};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a hex string or RGB values.
///
/// # Examples
/// ```toml
/// # Hex color, same format the color picker produces
/// default_color = "#6C7D47"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [108, 125, 71]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Hex color: `#RRGGBB` or `#RGB`
    Hex(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unparsable hex strings fall back to the default pen color with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Hex(value) => Color::from_hex(value).unwrap_or_else(|err| {
                warn!("{}, using {}", err, OLIVE.to_hex());
                OLIVE
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        ColorSpec::Hex(OLIVE.to_hex())
    }
}
