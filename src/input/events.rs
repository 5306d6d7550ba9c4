//! Generic input event types delivered by the host UI.
//!
//! Events mirror the whiteboard's controls and the raw pointer/touch stream.
//! They deserialize from a tagged JSON form so recorded sessions can be replayed:
//!
//! ```json
//! [
//!   {"type": "set-color", "value": "#6C7D47"},
//!   {"type": "pointer-down", "x": 30.0, "y": 30.0},
//!   {"type": "pointer-move", "x": 120.0, "y": 30.0},
//!   {"type": "pointer-up"},
//!   {"type": "undo"}
//! ]
//! ```

use crate::util::Point;
use serde::{Deserialize, Serialize};

/// One discrete event from the UI or the pointer device.
///
/// Pointer and touch coordinates are in viewport space; the session maps them
/// onto the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InputEvent {
    /// Primary mouse button pressed over the surface
    PointerDown { x: f64, y: f64 },
    /// Mouse moved over the surface
    PointerMove { x: f64, y: f64 },
    /// Primary mouse button released
    PointerUp,
    /// Pointer left the surface bounds
    PointerLeave,
    /// Touch began; only the first touch point is consulted
    TouchStart { touches: Vec<Point> },
    /// Touch moved; only the first touch point is consulted
    TouchMove { touches: Vec<Point> },
    /// Touch ended
    TouchEnd,
    /// Host container resized (content box in viewport pixels)
    Resize {
        width: f64,
        height: f64,
        #[serde(default)]
        left: f64,
        #[serde(default)]
        top: f64,
    },
    /// Tool button clicked (`pen` or `eraser`)
    SelectTool { tool: String },
    /// Color picker changed
    SetColor { value: String },
    /// Width control changed
    SetWidth { value: f64 },
    /// Board-name field edited
    SetBoardName { value: String },
    Undo,
    Redo,
    Clear,
    Save,
    Export,
    ZoomIn,
    ZoomOut,
}

impl InputEvent {
    /// Returns true for raw pointer or touch events.
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerDown { .. }
                | InputEvent::PointerMove { .. }
                | InputEvent::PointerUp
                | InputEvent::PointerLeave
                | InputEvent::TouchStart { .. }
                | InputEvent::TouchMove { .. }
                | InputEvent::TouchEnd
        )
    }
}
