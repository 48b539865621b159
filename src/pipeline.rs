//! End-to-end pipeline: source raster in, budget-fitted HTML out.

use std::time::Duration;

use crate::html::{minify, render_html};
use crate::raster::RasterImage;
use crate::rle::rle_encode;
use crate::search::{fit_to_budget, BudgetFit, Trial};
use crate::transform::transform;
use crate::{
    DitherError, Result, COLORS_MAX, MAX_SIZE_MAX, MAX_SIZE_MIN, PIXEL_SCALE_MAX, PIXEL_SCALE_MIN,
};

/// Opening width guess. Reasonable for post-sized budgets; the doubling
/// phase recovers quickly when it is far off.
const START_WIDTH: usize = 48;

/// Options for rendering an image as budget-fitted pixel art.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Palette size: 0 = auto-detect, 1 = fixed black/white, N = exactly N
    /// colors (max 128).
    pub colors: u16,

    /// Rendered size of one image pixel, in CSS pixels (1-32).
    pub pixel_scale: usize,

    /// Output byte budget the markup must not exceed (1024-204800).
    pub max_size: usize,

    /// Soft wall-clock limit for the size search.
    pub timeout: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            colors: 16,
            pixel_scale: 8,
            max_size: MAX_SIZE_MAX,
            timeout: Duration::from_secs(10),
        }
    }
}

impl RenderOptions {
    /// Check every option against its documented range.
    pub fn validate(&self) -> Result<()> {
        if self.colors > COLORS_MAX {
            return Err(DitherError::ParameterOutOfRange {
                name: "colors",
                value: self.colors as usize,
                min: 0,
                max: COLORS_MAX as usize,
            });
        }
        if self.pixel_scale < PIXEL_SCALE_MIN || self.pixel_scale > PIXEL_SCALE_MAX {
            return Err(DitherError::ParameterOutOfRange {
                name: "pixel_size",
                value: self.pixel_scale,
                min: PIXEL_SCALE_MIN,
                max: PIXEL_SCALE_MAX,
            });
        }
        if self.max_size < MAX_SIZE_MIN || self.max_size > MAX_SIZE_MAX {
            return Err(DitherError::ParameterOutOfRange {
                name: "max_size",
                value: self.max_size,
                min: MAX_SIZE_MIN,
                max: MAX_SIZE_MAX,
            });
        }
        Ok(())
    }
}

/// Convert a source image into minified pixel-art HTML that fits within
/// `opts.max_size` bytes.
///
/// Runs the adaptive size search over the full
/// resize → quantize → run-length-encode → render → minify pipeline. Each
/// trial works on a fresh copy of the source at a candidate width; the
/// search keeps the largest width whose output stays under budget and
/// returns its markup.
///
/// # Errors
/// [`DitherError::BudgetExhausted`] if no tried width produced output
/// within the budget before the timeout or the search space ran out; any
/// transform failure aborts the search as-is.
pub fn render_pixel_art(source: &RasterImage, opts: &RenderOptions) -> Result<String> {
    opts.validate()?;

    let outcome = fit_to_budget(START_WIDTH, opts.timeout, |width| {
        let quantized = transform(source, width, opts.colors)?;
        let html = minify(&render_html(&rle_encode(&quantized), opts.pixel_scale));
        Ok(Trial {
            fit: BudgetFit::classify(html.len(), opts.max_size),
            output: html,
        })
    })?;

    match outcome {
        Some(html) => {
            tracing::info!(bytes = html.len(), budget = opts.max_size, "render fit budget");
            Ok(html)
        }
        None => {
            tracing::warn!(budget = opts.max_size, "no width fit the byte budget");
            Err(DitherError::BudgetExhausted {
                budget: opts.max_size,
            })
        }
    }
}
