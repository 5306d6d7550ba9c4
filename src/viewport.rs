//! Presentation-only zoom.
//!
//! The scale never touches the raster or the input mapping; a host applies it
//! when compositing the surface onto the screen.

use crate::config::ViewportConfig;

/// Clamped presentation scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::from_config(&ViewportConfig::default())
    }
}

impl ViewportState {
    pub fn from_config(config: &ViewportConfig) -> Self {
        Self {
            scale: 1.0,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            zoom_in_factor: config.zoom_in_factor,
            zoom_out_factor: config.zoom_out_factor,
        }
    }

    /// Multiplies the scale by `factor`, clamped to the configured bounds.
    ///
    /// Non-positive or non-finite factors leave the scale unchanged.
    pub fn zoom(&mut self, factor: f64) -> f64 {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("Ignoring invalid zoom factor {}", factor);
            return self.scale;
        }
        let next = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if next == self.scale {
            log::debug!("Zoom already at bound {}", self.scale);
        }
        self.scale = next;
        self.scale
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.zoom(self.zoom_in_factor)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.zoom(self.zoom_out_factor)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Displayed zoom percentage, rounded to the nearest integer.
    pub fn percentage(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    /// Zoom level label, e.g. `110%`.
    pub fn label(&self) -> String {
        format!("{}%", self.percentage())
    }

    /// CSS transform equivalent of the current scale, e.g. `scale(1.1)`.
    pub fn css_transform(&self) -> String {
        // Trim float noise like 1.2100000000000002 without losing real precision.
        let rounded = (self.scale * 1_000_000.0).round() / 1_000_000.0;
        format!("scale({})", rounded)
    }
}
