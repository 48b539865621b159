//! Fetch and decode a source image from a URL.

use crate::raster::RasterImage;
use crate::Result;

/// Download the image at `url` and decode it into an RGBA raster.
///
/// Network failures and non-success statuses surface as
/// [`DitherError::Fetch`](crate::DitherError::Fetch); bytes that aren't a
/// decodable image surface as
/// [`DitherError::Decode`](crate::DitherError::Decode). There is no silent
/// empty-image fallback.
pub fn fetch_image(url: &str) -> Result<RasterImage> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let bytes = response.bytes()?;
    tracing::debug!(url, bytes = bytes.len(), "fetched image");

    let decoded = image::load_from_memory(&bytes)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    RasterImage::new(width as usize, height as usize, decoded.into_raw())
}
