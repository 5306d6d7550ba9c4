//! Cairo-based rendering of freehand stroke segments.

use super::color::Color;
use crate::util::Point;

/// Whether a paint operation adds color or removes existing pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Source-over: the stroke color is laid on top of existing pixels.
    Paint,
    /// Destination-out: covered pixels become transparent.
    Erase,
}

impl CompositeMode {
    fn operator(self) -> cairo::Operator {
        match self {
            CompositeMode::Paint => cairo::Operator::Over,
            CompositeMode::Erase => cairo::Operator::DestOut,
        }
    }
}

/// Paint parameters latched for the lifetime of one stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub composite: CompositeMode,
    pub color: Color,
    pub width: f64,
}

/// Renders one straight segment of a freehand stroke.
///
/// Round caps at both ends make consecutive segments join seamlessly, so a
/// stroke can be painted incrementally as the pointer moves.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `style` - Latched stroke parameters
/// * `from` - Previous pointer position (surface coordinates)
/// * `to` - New pointer position (surface coordinates)
pub fn render_segment(
    ctx: &cairo::Context,
    style: &StrokeStyle,
    from: Point,
    to: Point,
) -> Result<(), cairo::Error> {
    ctx.save()?;

    ctx.set_operator(style.composite.operator());
    match style.composite {
        // Only the source alpha matters for destination-out.
        CompositeMode::Erase => ctx.set_source_rgba(0.0, 0.0, 0.0, 1.0),
        CompositeMode::Paint => {
            let color = style.color;
            ctx.set_source_rgba(color.r, color.g, color.b, color.a);
        }
    }
    ctx.set_line_width(style.width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    let result = ctx.stroke();

    ctx.restore()?;
    result
}

/// Renders a whole polyline with the given style.
///
/// Used when a host needs to replay a recorded pointer path in one call.
pub fn render_polyline(
    ctx: &cairo::Context,
    style: &StrokeStyle,
    points: &[Point],
) -> Result<(), cairo::Error> {
    for pair in points.windows(2) {
        render_segment(ctx, style, pair[0], pair[1])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawingSurface;
    use crate::draw::color::{BLACK, OLIVE};

    fn pen(width: f64) -> StrokeStyle {
        StrokeStyle {
            composite: CompositeMode::Paint,
            color: OLIVE,
            width,
        }
    }

    #[test]
    fn paint_segment_covers_its_path() {
        let mut surface = DrawingSurface::new(120, 20).unwrap();
        {
            let ctx = surface.context().unwrap();
            render_segment(&ctx, &pen(3.0), Point::new(10.0, 10.0), Point::new(100.0, 10.0)).unwrap();
        }
        assert_ne!(surface.pixel(50, 10).unwrap(), Some(0));
        assert_eq!(surface.pixel(50, 2).unwrap(), Some(0));
        assert_eq!(surface.pixel(115, 10).unwrap(), Some(0));
    }

    #[test]
    fn erase_segment_leaves_transparent_pixels() {
        let mut surface = DrawingSurface::new(40, 40).unwrap();
        {
            let ctx = surface.context().unwrap();
            ctx.set_source_rgba(1.0, 1.0, 1.0, 1.0);
            ctx.paint().unwrap();
            let eraser = StrokeStyle {
                composite: CompositeMode::Erase,
                color: BLACK,
                width: 9.0,
            };
            render_segment(&ctx, &eraser, Point::new(5.0, 20.0), Point::new(35.0, 20.0)).unwrap();
        }
        assert_eq!(surface.pixel(20, 20).unwrap(), Some(0));
        assert_ne!(surface.pixel(20, 2).unwrap(), Some(0));
    }

    #[test]
    fn polyline_renders_every_segment() {
        let mut surface = DrawingSurface::new(60, 60).unwrap();
        {
            let ctx = surface.context().unwrap();
            let points = [
                Point::new(10.0, 10.0),
                Point::new(50.0, 10.0),
                Point::new(50.0, 50.0),
            ];
            render_polyline(&ctx, &pen(2.0), &points).unwrap();
        }
        assert_ne!(surface.pixel(30, 10).unwrap(), Some(0));
        assert_ne!(surface.pixel(50, 30).unwrap(), Some(0));
        assert_eq!(surface.pixel(30, 30).unwrap(), Some(0));
    }
}
