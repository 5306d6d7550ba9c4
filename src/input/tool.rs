//! Drawing tool selection and the process-wide tool state.

use crate::config::DrawingConfig;
use crate::draw::{Color, CompositeMode, StrokeStyle};
use std::str::FromStr;

/// Drawing tool selection.
///
/// Exactly one tool is active at a time; the active tool determines the
/// composite mode of the next stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Freehand pen - paints the active color
    #[default]
    Pen,
    /// Eraser - clears pixels to transparent with a wider stroke
    Eraser,
}

impl Tool {
    /// Identifier used by the tool buttons (`data-tool` attribute).
    pub fn id(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
        }
    }

    /// Pointer affordance shown over the surface while this tool is active.
    pub fn cursor(self) -> CursorStyle {
        match self {
            Tool::Pen => CursorStyle::Crosshair,
            Tool::Eraser => CursorStyle::Grab,
        }
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pen" => Ok(Tool::Pen),
            "eraser" => Ok(Tool::Eraser),
            other => Err(format!("unknown tool '{other}'")),
        }
    }
}

/// Cursor style hint for the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    Crosshair,
    Grab,
}

impl CursorStyle {
    /// CSS cursor keyword for this style.
    pub fn css_name(self) -> &'static str {
        match self {
            CursorStyle::Crosshair => "crosshair",
            CursorStyle::Grab => "grab",
        }
    }
}

/// Active tool, color, and base stroke width.
///
/// Mutated by the UI controls and read by the stroke engine when a stroke
/// begins. Last write wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    tool: Tool,
    color: Color,
    width: f64,
    eraser_multiplier: f64,
}

impl ToolState {
    pub fn new(tool: Tool, color: Color, width: f64, eraser_multiplier: f64) -> Self {
        Self {
            tool,
            color,
            width,
            eraser_multiplier,
        }
    }

    /// Builds the initial tool state from the drawing config.
    pub fn from_config(config: &DrawingConfig) -> Self {
        Self::new(
            Tool::Pen,
            config.default_color.to_color(),
            config.default_width,
            config.eraser_multiplier,
        )
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn cursor(&self) -> CursorStyle {
        self.tool.cursor()
    }

    /// Selects a tool by its button identifier. Unknown ids leave the state untouched.
    pub fn set_tool(&mut self, id: &str) -> bool {
        match id.parse::<Tool>() {
            Ok(tool) => {
                if tool != self.tool {
                    log::debug!("Tool changed from {} to {}", self.tool.id(), tool.id());
                }
                self.tool = tool;
                true
            }
            Err(err) => {
                log::warn!("Ignoring tool selection: {err}");
                false
            }
        }
    }

    /// Sets the pen color from a color-picker value.
    pub fn set_color(&mut self, value: &str) -> bool {
        match Color::from_hex(value) {
            Ok(color) => {
                self.color = color;
                true
            }
            Err(err) => {
                log::warn!("Ignoring color change: {err}");
                false
            }
        }
    }

    /// Sets the base stroke width. Only positive finite widths are accepted.
    pub fn set_width(&mut self, value: f64) -> bool {
        if value.is_finite() && value > 0.0 {
            self.width = value;
            true
        } else {
            log::warn!("Ignoring non-positive stroke width {value}");
            false
        }
    }

    /// Paint parameters a stroke started now would use.
    pub fn stroke_style(&self) -> StrokeStyle {
        match self.tool {
            Tool::Pen => StrokeStyle {
                composite: CompositeMode::Paint,
                color: self.color,
                width: self.width,
            },
            Tool::Eraser => StrokeStyle {
                composite: CompositeMode::Erase,
                color: self.color,
                width: self.width * self.eraser_multiplier,
            },
        }
    }
}

impl Default for ToolState {
    fn default() -> Self {
        Self::from_config(&DrawingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::OLIVE;

    #[test]
    fn defaults_to_olive_pen_width_three() {
        let state = ToolState::default();
        assert_eq!(state.tool(), Tool::Pen);
        assert_eq!(state.color(), OLIVE);
        assert_eq!(state.width(), 3.0);
        assert_eq!(state.cursor(), CursorStyle::Crosshair);
    }

    #[test]
    fn eraser_uses_triple_width_and_erase_mode() {
        let mut state = ToolState::default();
        assert!(state.set_tool("eraser"));
        state.set_width(4.0);

        let style = state.stroke_style();
        assert_eq!(style.composite, CompositeMode::Erase);
        assert_eq!(style.width, 12.0);
        assert_eq!(state.cursor().css_name(), "grab");
    }

    #[test]
    fn invalid_control_values_are_ignored() {
        let mut state = ToolState::default();
        assert!(!state.set_tool("lasso"));
        assert!(!state.set_color("not-a-color"));
        assert!(!state.set_width(0.0));
        assert!(!state.set_width(f64::NAN));
        assert_eq!(state, ToolState::default());
    }

    #[test]
    fn pen_style_uses_active_color() {
        let mut state = ToolState::default();
        state.set_color("#ff0000");
        let style = state.stroke_style();
        assert_eq!(style.composite, CompositeMode::Paint);
        assert_eq!(style.color.to_hex(), "#FF0000");
        assert_eq!(style.width, 3.0);
    }
}
