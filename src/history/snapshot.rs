//! Lossless full-raster snapshots.
//!
//! A snapshot is the surface geometry plus its premultiplied pixel bytes,
//! gzip-compressed. Decoding yields exactly the bytes that were captured.

use crate::draw::{DrawingSurface, RasterData, SurfaceError};
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use std::io::{Read, Write};
use thiserror::Error;

/// Errors raised while encoding, decoding, or restoring snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("surface access failed: {0}")]
    Surface(#[from] SurfaceError),

    #[error("snapshot compression failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt snapshot: {0}")]
    Corrupt(String),

    #[error("snapshot restore worker is not running")]
    WorkerUnavailable,
}

/// Encoded copy of the full drawing surface at one point in history.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: i32,
    height: i32,
    stride: i32,
    compressed: Vec<u8>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("encoded_len", &self.compressed.len())
            .finish()
    }
}

impl Snapshot {
    /// Captures the surface as it is right now.
    pub fn capture(surface: &mut DrawingSurface, level: u32) -> Result<Self, SnapshotError> {
        let raster = surface.raster()?;
        Self::encode(&raster, level)
    }

    /// Compresses a raster copy.
    pub fn encode(raster: &RasterData, level: u32) -> Result<Self, SnapshotError> {
        raster.validate()?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level.min(9)));
        encoder.write_all(&raster.data)?;
        let compressed = encoder.finish()?;
        Ok(Self {
            width: raster.width,
            height: raster.height,
            stride: raster.stride,
            compressed,
        })
    }

    /// Rebuilds a snapshot from stored parts without validating the payload.
    ///
    /// Any corruption surfaces later, from [`Snapshot::decode`].
    pub fn from_parts(width: i32, height: i32, stride: i32, compressed: Vec<u8>) -> Self {
        Self {
            width,
            height,
            stride,
            compressed,
        }
    }

    /// Decompresses the snapshot back into a raster.
    pub fn decode(&self) -> Result<RasterData, SnapshotError> {
        let expected = self.stride.max(0) as usize * self.height.max(0) as usize;
        let mut data = Vec::with_capacity(expected);
        GzDecoder::new(&self.compressed[..])
            .read_to_end(&mut data)
            .map_err(|err| SnapshotError::Corrupt(err.to_string()))?;

        let raster = RasterData {
            width: self.width,
            height: self.height,
            stride: self.stride,
            data,
        };
        raster
            .validate()
            .map_err(|err| SnapshotError::Corrupt(err.to_string()))?;
        Ok(raster)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size of the compressed payload in bytes.
    pub fn encoded_len(&self) -> usize {
        self.compressed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_then_decode_is_exact() {
        let mut surface = DrawingSurface::new(50, 30).unwrap();
        {
            let ctx = surface.context().unwrap();
            ctx.set_source_rgba(0.9, 0.3, 0.1, 0.45);
            ctx.set_line_width(5.0);
            ctx.move_to(3.3, 7.1);
            ctx.line_to(44.0, 25.5);
            ctx.stroke().unwrap();
        }
        let original = surface.raster().unwrap();

        let snapshot = Snapshot::capture(&mut surface, 1).unwrap();
        assert_eq!(snapshot.width(), 50);
        assert_eq!(snapshot.height(), 30);
        assert_eq!(snapshot.decode().unwrap(), original);
    }

    #[test]
    fn blank_surfaces_compress_well() {
        let mut surface = DrawingSurface::new(400, 300).unwrap();
        let snapshot = Snapshot::capture(&mut surface, 6).unwrap();
        assert!(snapshot.encoded_len() < 400 * 300 * 4 / 50);
    }

    #[test]
    fn garbage_payload_is_corrupt() {
        let snapshot = Snapshot::from_parts(4, 4, 16, b"definitely not gzip".to_vec());
        assert!(matches!(snapshot.decode(), Err(SnapshotError::Corrupt(_))));
    }

    #[test]
    fn truncated_payload_is_corrupt() {
        let raster = RasterData {
            width: 2,
            height: 2,
            stride: 8,
            data: vec![7; 16],
        };
        let good = Snapshot::encode(&raster, 1).unwrap();
        // Same payload, wrong geometry.
        let wrong = Snapshot::from_parts(2, 3, 8, good.compressed.clone());
        assert!(matches!(wrong.decode(), Err(SnapshotError::Corrupt(_))));
    }
}
