//! Flat RGBA raster image, the unit of exchange between pipeline stages.

use crate::{DitherError, Result};

/// An RGBA image stored as a flat, row-major byte buffer (4 bytes per pixel).
///
/// Invariant: `pixels.len() == width * height * 4`, enforced by [`RasterImage::new`].
/// Stages pass these by value; the search clones a fresh copy per trial and
/// never mutates the original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a raster image, validating dimensions and buffer size.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DitherError::InvalidDimensions { width, height });
        }
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(DitherError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// RGBA sample at (x, y). Caller guarantees coordinates are in bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * self.width + x) * 4;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]
    }

    /// Iterate over rows as RGBA byte slices.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(self.width * 4)
    }
}
