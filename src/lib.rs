//! pictoglyph: photograph → minimal pictogram line drawing.
//!
//! Extracts the dominant silhouette of a photo and re-renders it as a
//! simplified stroke figure on a fixed square canvas.
//!
//! # Example
//!
//! ```no_run
//! use pictoglyph::{render_pictogram, Outcome, StyleParameters};
//! use std::path::Path;
//!
//! let raster = pictoglyph::bitmap::load(Path::new("photo.jpg"))?;
//! let pictogram = render_pictogram(&raster, &StyleParameters::default())?;
//! if let Outcome::Rendered { polygon, .. } = &pictogram.outcome {
//!     println!("{} vertices", polygon.len());
//! }
//! pictogram.image.save("glyph.png").ok();
//! # Ok::<(), pictoglyph::PictogramError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod geom;

pub mod bitmap;
pub mod contour;
pub mod edges;
pub mod error;
pub mod normalize;
pub mod render;
pub mod simplify;
pub mod texture;

pub use config::{Style, StyleParameters};
pub use contour::Curve;
pub use edges::EdgeMap;
pub use error::PictogramError;
pub use geom::BoundingBox;
pub use simplify::Polygon;
pub use texture::{SeededSource, UniformSource};

use image::{DynamicImage, RgbImage};
use std::time::Instant;

/// How a pipeline run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A contour was found, simplified and drawn.
    Rendered {
        /// The dominant boundary, in source pixels.
        curve: Curve,
        /// Its simplification, in source pixels.
        polygon: Polygon,
    },
    /// The edge map held no boundary; `image` is the grayscale source.
    NoContour,
}

/// The result of one pipeline run.
#[derive(Debug, Clone)]
pub struct Pictogram {
    /// The rendered canvas, or the grayscale source as RGB on fallback.
    pub image: RgbImage,
    /// Edge map the contour was extracted from.
    pub edges: EdgeMap,
    /// Whether a glyph was drawn, with the curve and polygon behind it.
    pub outcome: Outcome,
}

impl Pictogram {
    /// True when no contour was found and `image` is the grayscale source.
    pub fn is_fallback(&self) -> bool {
        self.outcome == Outcome::NoContour
    }
}

/// Full pipeline: raster → pictogram.
///
/// The textured style draws from a fresh OS-seeded random source; use
/// [`render_pictogram_with`] for reproducible textures.
pub fn render_pictogram(
    raster: &DynamicImage,
    params: &StyleParameters,
) -> Result<Pictogram, PictogramError> {
    render_pictogram_with(raster, params, &mut SeededSource::from_entropy())
}

/// Full pipeline with an explicit random source.
///
/// Pipeline: hysteresis edge detection, outer-contour selection by area,
/// RDP simplification relative to perimeter, then normalized rendering.
pub fn render_pictogram_with<R: UniformSource + ?Sized>(
    raster: &DynamicImage,
    params: &StyleParameters,
    rng: &mut R,
) -> Result<Pictogram, PictogramError> {
    let t_start = Instant::now();
    params.validate()?;

    // ── Edges ─────────────────────────────────────────────
    let (edges, gray) = edges::extract(raster, params.low_threshold, params.high_threshold)?;
    let (w, h) = edges.dimensions();
    tracing::info!(
        "Edges       {}x{} px, {} edge pixels (thresholds {}/{})",
        w,
        h,
        edges.edge_count(),
        params.low_threshold,
        params.high_threshold,
    );

    // ── Contour ───────────────────────────────────────────
    let Some(curve) = contour::select(&edges) else {
        tracing::info!("Contour     none found, returning grayscale source");
        return Ok(Pictogram {
            image: bitmap::grayscale_as_rgb(&gray),
            edges,
            outcome: Outcome::NoContour,
        });
    };
    tracing::info!(
        "Contour     {} points, area {:.0} px\u{00b2}",
        curve.len(),
        curve.area()
    );

    // ── Simplify ──────────────────────────────────────────
    let polygon = simplify::simplify(&curve, params.simplification)?;
    tracing::info!(
        "Simplify    {} \u{2192} {} points (strength {})",
        curve.len(),
        polygon.len(),
        params.simplification,
    );

    // ── Render ────────────────────────────────────────────
    let image = render::render(&polygon, (w, h), params, rng)?;
    tracing::info!(
        "Render      {:?} {}x{} ({}ms)",
        params.style,
        image.width(),
        image.height(),
        t_start.elapsed().as_millis(),
    );

    Ok(Pictogram {
        image,
        edges,
        outcome: Outcome::Rendered { curve, polygon },
    })
}
