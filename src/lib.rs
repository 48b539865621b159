//! # ditherbot
//!
//! Convert an arbitrary source image into a byte-budgeted, color-quantized,
//! HTML-renderable pixel-art representation, small enough to paste into a
//! post on a platform with a strict per-post size limit.
//!
//! The interesting part is the adaptive size-fitting search: given a target
//! output byte budget, find image dimensions that, after quantization,
//! dithering and run-length encoding to compact HTML, produce output as
//! close as possible to (but never over) that budget, within a bounded
//! wall-clock window.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ditherbot::{fetch_image, render_pixel_art, RenderOptions};
//!
//! let image = fetch_image("https://example.com/cat.png")?;
//! let html = render_pixel_art(&image, &RenderOptions::default())?;
//! println!("{html}");
//! ```

use thiserror::Error;

pub mod fetch;
pub mod html;
pub mod pipeline;
pub mod raster;
pub mod rle;
pub mod search;
pub mod server;
pub mod transform;

pub use fetch::fetch_image;
pub use html::{minify, render_html};
pub use pipeline::{render_pixel_art, RenderOptions};
pub use raster::RasterImage;
pub use rle::{rle_encode, RleImage, Run};
pub use search::{fit_to_budget, BudgetFit, Trial};
pub use transform::{quantize, resize_to_width, transform};

/// Errors that can occur while rendering pixel art.
#[derive(Debug, Error)]
pub enum DitherError {
    /// Invalid image dimensions (width or height is zero or too large)
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Buffer size doesn't match expected size for dimensions
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A request parameter is outside its documented range
    #[error("{name} out of range: {value} (expected {min}..={max})")]
    ParameterOutOfRange {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    /// Fetching the source image over HTTP failed
    #[error("failed to fetch image: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The fetched bytes could not be decoded as an image
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Color quantization failed
    #[error("quantization error: {0}")]
    Quantization(#[from] imagequant::Error),

    /// No rendering at any tried width fit within the byte budget
    #[error("failed to fit image within {budget} bytes")]
    BudgetExhausted { budget: usize },
}

/// Result type for ditherbot operations.
pub type Result<T> = core::result::Result<T, DitherError>;

// Shared limits; the HTTP layer enforces the same ranges before the core runs.
pub(crate) const SEARCH_WIDTH_LIMIT: usize = 1_000_000;
pub const COLORS_MAX: u16 = 128;
pub const PIXEL_SCALE_MIN: usize = 1;
pub const PIXEL_SCALE_MAX: usize = 32;
pub const MAX_SIZE_MIN: usize = 1024;
pub const MAX_SIZE_MAX: usize = 204_800;
