//! Stroke state machine.

use crate::draw::StrokeStyle;
use crate::util::Point;

/// Current drawing mode state machine.
///
/// Tracks whether the user is idle or holding the pointer down mid-stroke.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// Not actively drawing - waiting for a pointer-down
    Idle,
    /// Actively drawing a stroke (pointer held down)
    Drawing {
        /// Paint parameters latched when the stroke began
        style: StrokeStyle,
        /// Where the pointer went down (surface coordinates)
        start: Point,
        /// Most recent pointer position, the start of the next segment
        last: Point,
        /// Number of segments painted so far
        segments: usize,
    },
}

/// Logical pointer action after mouse and touch events are unified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    Down(Point),
    Move(Point),
    Up,
    Leave,
}

/// Renders freehand strokes from normalized pointer input.
///
/// The engine never owns the surface; each handler borrows it for the
/// duration of one segment.
#[derive(Debug)]
pub struct StrokeEngine {
    pub(crate) state: DrawingState,
}

impl StrokeEngine {
    pub fn new() -> Self {
        Self {
            state: DrawingState::Idle,
        }
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    /// Style of the stroke in progress, if any.
    pub fn active_style(&self) -> Option<&StrokeStyle> {
        match &self.state {
            DrawingState::Drawing { style, .. } => Some(style),
            DrawingState::Idle => None,
        }
    }

    /// Abandons the stroke in progress without reporting completion.
    ///
    /// Pixels already painted stay on the surface.
    pub fn cancel(&mut self) {
        if self.is_drawing() {
            log::debug!("Abandoning stroke in progress");
        }
        self.state = DrawingState::Idle;
    }
}

impl Default for StrokeEngine {
    fn default() -> Self {
        Self::new()
    }
}
