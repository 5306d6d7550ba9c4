//! Raster drawing surface and its container-driven sizing.
//!
//! [`DrawingSurface`] wraps a premultiplied ARGB32 Cairo image surface. Cairo
//! contexts are created per operation and dropped before the pixel buffer is
//! touched, so the surface is never borrowed by a long-lived context.
//!
//! [`SurfaceManager`] owns the surface, sizes it from the host container, and
//! maps viewport-space input coordinates onto surface pixels.

use crate::config::SurfaceConfig;
use crate::util::Point;
use cairo::{Context, Format, ImageSurface};
use thiserror::Error;

/// Errors raised by raster operations.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("cairo operation failed: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("surface pixel buffer is busy: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error("pixel buffer of {actual} bytes does not match {width}x{height} (stride {stride})")]
    BufferSize {
        width: i32,
        height: i32,
        stride: i32,
        actual: usize,
    },
}

/// Raw copy of a surface's pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterData {
    pub width: i32,
    pub height: i32,
    pub stride: i32,
    /// Premultiplied ARGB32 rows, `stride * height` bytes.
    pub data: Vec<u8>,
}

impl RasterData {
    /// Checks that the buffer length matches the declared geometry.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        let expected = self.stride.max(0) as usize * self.height.max(0) as usize;
        if self.width <= 0 || self.height <= 0 || self.data.len() != expected {
            return Err(SurfaceError::BufferSize {
                width: self.width,
                height: self.height,
                stride: self.stride,
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}

/// The raster buffer strokes are painted onto.
pub struct DrawingSurface {
    surface: ImageSurface,
}

impl std::fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl DrawingSurface {
    /// Allocates a fully transparent surface.
    pub fn new(width: i32, height: i32) -> Result<Self, SurfaceError> {
        let surface = ImageSurface::create(Format::ARgb32, width, height)?;
        Ok(Self { surface })
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn stride(&self) -> i32 {
        self.surface.stride()
    }

    /// Creates a drawing context with rounded line caps and joins.
    ///
    /// The returned context holds a reference to the surface; drop it before
    /// calling any method that needs the pixel buffer.
    pub fn context(&self) -> Result<Context, SurfaceError> {
        let ctx = Context::new(&self.surface)?;
        ctx.set_line_cap(cairo::LineCap::Round);
        ctx.set_line_join(cairo::LineJoin::Round);
        Ok(ctx)
    }

    /// Wipes every pixel to fully transparent.
    pub fn clear(&mut self) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint()?;
        Ok(())
    }

    /// Copies the current pixel buffer out of the surface.
    pub fn raster(&mut self) -> Result<RasterData, SurfaceError> {
        self.surface.flush();
        let width = self.width();
        let height = self.height();
        let stride = self.stride();
        let data = self.surface.data()?.to_vec();
        Ok(RasterData {
            width,
            height,
            stride,
            data,
        })
    }

    /// Replaces the surface contents with a previously captured raster.
    ///
    /// The surface is cleared first. A raster of different dimensions is drawn
    /// at the origin and clipped to the current surface size.
    pub fn restore(&mut self, raster: &RasterData) -> Result<(), SurfaceError> {
        raster.validate()?;

        if raster.width == self.width()
            && raster.height == self.height()
            && raster.stride == self.stride()
        {
            self.surface.flush();
            let mut data = self.surface.data()?;
            data.copy_from_slice(&raster.data);
            return Ok(());
        }

        let source = ImageSurface::create_for_data(
            raster.data.clone(),
            Format::ARgb32,
            raster.width,
            raster.height,
            raster.stride,
        )?;
        self.clear()?;
        let ctx = self.context()?;
        ctx.set_source_surface(&source, 0.0, 0.0)?;
        ctx.paint()?;
        Ok(())
    }

    /// Encodes the raster as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.surface.flush();
        let mut buffer = Vec::new();
        self.surface.write_to_png(&mut buffer)?;
        Ok(buffer)
    }

    /// Returns the premultiplied ARGB value of one pixel, or `None` outside the surface.
    pub fn pixel(&mut self, x: i32, y: i32) -> Result<Option<u32>, SurfaceError> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return Ok(None);
        }
        self.surface.flush();
        let offset = (y * self.stride() + x * 4) as usize;
        let data = self.surface.data()?;
        let bytes = [
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ];
        Ok(Some(u32::from_ne_bytes(bytes)))
    }

    /// Returns true when no pixel carries any color or coverage.
    pub fn is_blank(&mut self) -> Result<bool, SurfaceError> {
        self.surface.flush();
        let data = self.surface.data()?;
        Ok(data.iter().all(|byte| *byte == 0))
    }

    /// Underlying Cairo surface, for hosts that composite it onto a window.
    pub fn image_surface(&self) -> &ImageSurface {
        &self.surface
    }
}

/// Content box of the element hosting the drawing surface, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBox {
    pub width: f64,
    pub height: f64,
    /// Viewport x coordinate of the container's left edge
    pub left: f64,
    /// Viewport y coordinate of the container's top edge
    pub top: f64,
}

impl ContainerBox {
    /// A container anchored at the viewport origin.
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            left: 0.0,
            top: 0.0,
        }
    }
}

/// Owns the drawing surface and its placement inside the host container.
#[derive(Debug)]
pub struct SurfaceManager {
    surface: DrawingSurface,
    container: ContainerBox,
    padding: u32,
    min_size: u32,
}

impl SurfaceManager {
    /// Sizes a fresh surface to the container minus the configured padding.
    pub fn initialize(container: ContainerBox, config: &SurfaceConfig) -> Result<Self, SurfaceError> {
        let (width, height) = surface_dimensions(container, config.padding, config.min_size);
        log::debug!(
            "Initializing {}x{} surface for {}x{} container",
            width,
            height,
            container.width,
            container.height
        );
        Ok(Self {
            surface: DrawingSurface::new(width, height)?,
            container,
            padding: config.padding,
            min_size: config.min_size,
        })
    }

    /// Re-runs the sizing logic. Prior contents are discarded, not rescaled.
    pub fn resize(&mut self, container: ContainerBox) -> Result<(), SurfaceError> {
        let (width, height) = surface_dimensions(container, self.padding, self.min_size);
        self.surface = DrawingSurface::new(width, height)?;
        self.container = container;
        log::debug!("Surface resized to {}x{}", width, height);
        Ok(())
    }

    /// Viewport-space position of the surface's top-left pixel.
    ///
    /// The surface sits centered in its container, inset by half the padding.
    pub fn origin(&self) -> Point {
        let inset = self.padding as f64 / 2.0;
        Point::new(self.container.left + inset, self.container.top + inset)
    }

    /// Converts viewport coordinates into surface-local coordinates.
    ///
    /// Presentation zoom is not part of this mapping.
    pub fn map_input_to_surface(&self, x: f64, y: f64) -> Point {
        let origin = self.origin();
        Point::new(x - origin.x, y - origin.y)
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface {
        &mut self.surface
    }

    pub fn container(&self) -> ContainerBox {
        self.container
    }
}

fn surface_dimensions(container: ContainerBox, padding: u32, min_size: u32) -> (i32, i32) {
    let min = min_size.max(1) as f64;
    let axis = |extent: f64, name: &str| -> i32 {
        let raw = if extent.is_finite() {
            (extent - padding as f64).floor()
        } else {
            0.0
        };
        if raw < min {
            log::warn!(
                "Container {} {:.1} leaves {:.1}px after padding; clamping to {}px",
                name,
                extent,
                raw,
                min
            );
            min as i32
        } else {
            raw.min(i32::MAX as f64) as i32
        }
    };
    (axis(container.width, "width"), axis(container.height, "height"))
}
