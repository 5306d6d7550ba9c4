//! Raster primitives (Cairo-based).
//!
//! This module defines the drawing layer of the whiteboard:
//! - [`Color`]: RGBA color representation with hex parsing
//! - [`DrawingSurface`]: the ARGB32 raster strokes are painted onto
//! - [`SurfaceManager`]: container sizing and input coordinate mapping
//! - Segment rendering with paint/erase composite modes

pub mod color;
pub mod render;
pub mod surface;

// Re-export commonly used types at module level
pub use color::{BLACK, Color, OLIVE, ParseColorError, WHITE};
pub use render::{CompositeMode, StrokeStyle, render_polyline, render_segment};
pub use surface::{ContainerBox, DrawingSurface, RasterData, SurfaceError, SurfaceManager};
