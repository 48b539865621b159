//! Resize and palette-quantize raster images.
//!
//! Quantization and dithering are delegated to imagequant; this module is
//! the glue that feeds it RGBA buffers and rebuilds a raster from the
//! remapped palette indices. Both steps are deterministic for identical
//! inputs (fixed resample filter, fixed speed and dithering level), which
//! the byte-budget search depends on.

use image::{imageops, RgbaImage};
use imagequant::{Attributes, RGBA};

use crate::raster::RasterImage;
use crate::{DitherError, Result};

/// Resize to `target_width`, preserving aspect ratio.
///
/// The new height is `round(target_width / width * height)`, clamped to at
/// least one row. Resampling uses a triangle (bilinear) filter.
pub fn resize_to_width(src: &RasterImage, target_width: usize) -> Result<RasterImage> {
    if target_width == 0 {
        return Err(DitherError::InvalidDimensions {
            width: target_width,
            height: src.height,
        });
    }
    let scale = target_width as f64 / src.width as f64;
    let target_height = ((scale * src.height as f64).round() as usize).max(1);

    let buffer = RgbaImage::from_raw(src.width as u32, src.height as u32, src.pixels.clone())
        .ok_or(DitherError::BufferSizeMismatch {
            expected: src.width * src.height * 4,
            actual: src.pixels.len(),
        })?;
    let resized = imageops::resize(
        &buffer,
        target_width as u32,
        target_height as u32,
        imageops::FilterType::Triangle,
    );
    RasterImage::new(target_width, target_height, resized.into_raw())
}

/// Quantize an image to a bounded palette with error-diffusion dithering.
///
/// Palette-size policy:
/// * `0`: auto, let imagequant choose representative colors (up to 256)
/// * `1`: fixed two-color black/white palette, regardless of content
/// * `N >= 2`: exactly N colors derived from the image's color statistics
pub fn quantize(src: &RasterImage, colors: u16) -> Result<RasterImage> {
    let pixels: Vec<RGBA> = src
        .pixels
        .chunks_exact(4)
        .map(|c| RGBA::new(c[0], c[1], c[2], c[3]))
        .collect();

    let mut attr = Attributes::new();
    match colors {
        0 => {} // library default: up to 256 auto-selected colors
        1 => attr.set_max_colors(2)?,
        n => attr.set_max_colors(u32::from(n.min(256)))?,
    }
    // Fixed speed keeps repeated calls deterministic for the search.
    attr.set_speed(1)?;

    let mut img = attr.new_image(pixels, src.width, src.height, 0.0)?;
    if colors == 1 {
        img.add_fixed_color(RGBA::new(0, 0, 0, 255))?;
        img.add_fixed_color(RGBA::new(255, 255, 255, 255))?;
    }

    let mut result = attr.quantize(&mut img)?;
    result.set_dithering_level(1.0)?;
    let (palette, indices) = result.remapped(&mut img)?;

    let mut out = Vec::with_capacity(indices.len() * 4);
    for idx in indices {
        let c = palette[idx as usize];
        out.extend_from_slice(&[c.r, c.g, c.b, c.a]);
    }
    RasterImage::new(src.width, src.height, out)
}

/// Resize to `target_width` then quantize to the requested palette size.
///
/// One call per search trial; the source is untouched.
pub fn transform(src: &RasterImage, target_width: usize, colors: u16) -> Result<RasterImage> {
    let resized = resize_to_width(src, target_width)?;
    quantize(&resized, colors)
}
