use crate::draw::{DrawingSurface, SurfaceError, render_segment};
use crate::input::tool::ToolState;
use crate::util::Point;

use super::{DrawingState, StrokeEngine};

impl StrokeEngine {
    /// Processes a pointer-down at a surface position.
    ///
    /// # Behavior
    /// - While Idle: starts a stroke, latching the tool parameters now in effect
    /// - While Drawing: ignored (the first stroke keeps going)
    ///
    /// Nothing is painted until the pointer moves.
    pub fn on_pointer_down(&mut self, pos: Point, tools: &ToolState) {
        if self.is_drawing() {
            log::debug!("Pointer down while already drawing; ignoring");
            return;
        }

        let style = tools.stroke_style();
        log::debug!(
            "Stroke started at ({:.1}, {:.1}) with {:?} width {:.1}",
            pos.x,
            pos.y,
            style.composite,
            style.width
        );
        self.state = DrawingState::Drawing {
            style,
            start: pos,
            last: pos,
            segments: 0,
        };
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - While Drawing: paints the segment from the previous position immediately
    /// - While Idle: no paint
    ///
    /// Returns true when a segment was painted.
    pub fn on_pointer_move(
        &mut self,
        pos: Point,
        surface: &DrawingSurface,
    ) -> Result<bool, SurfaceError> {
        let DrawingState::Drawing {
            style,
            last,
            segments,
            ..
        } = &mut self.state
        else {
            return Ok(false);
        };

        let ctx = surface.context()?;
        render_segment(&ctx, style, *last, pos)?;
        *last = pos;
        *segments += 1;
        Ok(true)
    }

    /// Processes pointer release or the pointer leaving the surface.
    ///
    /// Returns true when a stroke was completed and needs a history commit;
    /// false when there was no stroke in progress.
    pub fn on_pointer_up(&mut self) -> bool {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Drawing {
                start, segments, ..
            } => {
                log::debug!(
                    "Stroke from ({:.1}, {:.1}) completed with {} segments",
                    start.x,
                    start.y,
                    segments
                );
                true
            }
            DrawingState::Idle => false,
        }
    }
}
