//! Run-length encoding of raster rows.
//!
//! Pixel art compresses extremely well per row: dithered output at small
//! widths is dominated by short flat spans, and the HTML renderer emits one
//! block element per run rather than one per pixel.

use crate::raster::RasterImage;

/// A horizontal run of `count` contiguous pixels sharing the same RGB color.
///
/// Alpha is ignored when runs are formed; `count` is always >= 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub count: usize,
}

/// A run-length encoded image: one run sequence per row.
///
/// Invariants: per row, run counts sum to `width`, and adjacent runs never
/// share an identical color (runs are maximal).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RleImage {
    pub width: usize,
    pub rows: Vec<Vec<Run>>,
}

/// Run-length encode a raster image, row by row.
///
/// A single linear pass: each pixel either extends the row's current run
/// (exact RGB match, alpha ignored) or starts a new run of count 1. Total
/// coverage is exact for any well-formed [`RasterImage`], so there are no
/// error cases.
pub fn rle_encode(image: &RasterImage) -> RleImage {
    let mut rows = Vec::with_capacity(image.height);
    for row in image.rows() {
        let mut runs: Vec<Run> = Vec::new();
        for px in row.chunks_exact(4) {
            match runs.last_mut() {
                Some(run) if run.r == px[0] && run.g == px[1] && run.b == px[2] => {
                    run.count += 1;
                }
                _ => runs.push(Run {
                    r: px[0],
                    g: px[1],
                    b: px[2],
                    count: 1,
                }),
            }
        }
        rows.push(runs);
    }
    RleImage {
        width: image.width,
        rows,
    }
}

impl RleImage {
    /// Expand back into a raster image (alpha fixed at 255).
    ///
    /// Inverse of [`rle_encode`] up to alpha; used by the round-trip tests.
    pub fn expand(&self) -> RasterImage {
        let height = self.rows.len();
        let mut pixels = Vec::with_capacity(self.width * height * 4);
        for row in &self.rows {
            for run in row {
                for _ in 0..run.count {
                    pixels.extend_from_slice(&[run.r, run.g, run.b, 255]);
                }
            }
        }
        RasterImage {
            width: self.width,
            height,
            pixels,
        }
    }
}
