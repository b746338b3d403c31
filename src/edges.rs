//! Edge extraction: raster → binary edge map.
//!
//! Grayscale conversion followed by two-threshold hysteresis edge
//! detection (`imageproc::edges::canny`: Gaussian smoothing, Sobel
//! gradients, non-maximum suppression, hysteresis). Strong edges at or
//! above `high` always survive; weaker ones down to `low` survive only
//! when chained to a strong edge.

use image::{DynamicImage, GrayImage};

use crate::bitmap;
use crate::error::PictogramError;

/// Binary edge map. Edge pixels are 255, background pixels are 0.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeMap {
    image: GrayImage,
}

impl EdgeMap {
    /// Wrap an existing binary image. Any non-zero pixel counts as an edge.
    pub fn from_image(image: GrayImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Out-of-bounds coordinates are background.
    pub fn is_edge(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height() && self.image.get_pixel(x, y).0[0] > 0
    }

    /// Number of edge pixels.
    pub fn edge_count(&self) -> usize {
        self.image.pixels().filter(|p| p.0[0] > 0).count()
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_image(self) -> GrayImage {
        self.image
    }
}

/// Detect edges in a raster.
///
/// Returns the edge map together with the grayscale image it was computed
/// from; the pipeline reuses the latter for its no-contour fallback.
pub fn extract(
    raster: &DynamicImage,
    low: u8,
    high: u8,
) -> Result<(EdgeMap, GrayImage), PictogramError> {
    let gray = bitmap::to_grayscale(raster)?;
    let edges = detect(&gray, low, high);
    Ok((edges, gray))
}

/// Smallest gradient magnitude hysteresis may follow.
///
/// Non-maximum suppression leaves the one-pixel frame at exactly zero, so a
/// positive floor keeps the flood fill off the frame. A zero threshold would
/// let it walk onto the frame and step outside the image.
const MIN_THRESHOLD: f32 = f32::EPSILON;

/// Hysteresis edge detection on an already-grayscale image.
///
/// Any threshold pair is accepted; zeros behave like the smallest positive
/// magnitude.
pub fn detect(gray: &GrayImage, low: u8, high: u8) -> EdgeMap {
    let (low, high) = ordered(low, high);
    let image = imageproc::edges::canny(
        gray,
        (low as f32).max(MIN_THRESHOLD),
        (high as f32).max(MIN_THRESHOLD),
    );
    EdgeMap { image }
}

/// Keep `low <= high` so hysteresis never runs with inverted bands.
fn ordered(low: u8, high: u8) -> (u8, u8) {
    (low.min(high), high)
}
