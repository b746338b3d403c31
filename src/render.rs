//! Glyph rasterization and side-by-side previews.
//!
//! Polygons are mapped into the canvas (see [`crate::normalize`]), turned
//! into kurbo `BezPath`s and rasterized with tiny-skia. Anti-aliasing is
//! off so repeated runs are pixel-identical and the glyph stays pure
//! black on white until the textured style blends and blurs it.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use kurbo::{BezPath, PathEl, Point};

use crate::config::{Style, StyleParameters};
use crate::error::PictogramError;
use crate::geom::BoundingBox;
use crate::normalize;
use crate::simplify::Polygon;
use crate::texture::{self, UniformSource};

/// Weight of the texture layer when blended over the outline.
pub const TEXTURE_WEIGHT: f32 = 0.3;

/// Gaussian blur sigma applied to the blended textured glyph.
pub const BLUR_SIGMA: f32 = 0.5;

/// Width of a texture stroke and of the filled style's outline.
const FINE_STROKE: f32 = 1.0;

/// Render a polygon (source coordinates) onto a fresh square canvas.
///
/// `source` is the width and height of the edge map the polygon came
/// from. `rng` is consulted only by [`Style::Textured`]. Callable on its
/// own, so `params` is validated here as well as in the pipeline.
pub fn render<R: UniformSource + ?Sized>(
    polygon: &Polygon,
    source: (u32, u32),
    params: &StyleParameters,
    rng: &mut R,
) -> Result<RgbImage, PictogramError> {
    if polygon.len() < 3 {
        return Err(PictogramError::EmptyPolygon(polygon.len()));
    }
    params.validate()?;

    let size = params.canvas_size;
    let points = normalize::to_canvas(&polygon.vertices, source, (size, size))?;
    let mut pixmap = blank_canvas(size)?;
    let thickness = params.thickness as f32;

    match params.style {
        Style::Outline => stroke_edges(&mut pixmap, &points, thickness),
        Style::Filled => fill_polygon(&mut pixmap, &points),
        Style::Textured => {
            stroke_edges(&mut pixmap, &points, thickness);
            let base = to_rgb(&pixmap);

            let bbox = BoundingBox::of(&points).ok_or(PictogramError::EmptyPolygon(0))?;
            let mut textured = pixmap.clone();
            for segment in texture::scatter(&bbox, rng) {
                let mut path = BezPath::new();
                path.move_to(pixel_center(segment.start));
                path.line_to(pixel_center(segment.end));
                stroke_path(&mut textured, &path, FINE_STROKE);
            }

            let blended = blend(&base, &to_rgb(&textured), TEXTURE_WEIGHT);
            return Ok(imageops::blur(&blended, BLUR_SIGMA));
        }
    }

    Ok(to_rgb(&pixmap))
}

// ── Styles ───────────────────────────────────────────────

/// Stroke every edge i → i+1 of the closed polygon as its own line.
fn stroke_edges(pixmap: &mut tiny_skia::Pixmap, points: &[(i32, i32)], width: f32) {
    let n = points.len();
    for i in 0..n {
        let mut edge = BezPath::new();
        edge.move_to(pixel_center(points[i]));
        edge.line_to(pixel_center(points[(i + 1) % n]));
        stroke_path(pixmap, &edge, width);
    }
}

/// Fill the polygon (even-odd) and trace its border once.
fn fill_polygon(pixmap: &mut tiny_skia::Pixmap, points: &[(i32, i32)]) {
    let path = points_to_path(points, true);
    if let Some(sk_path) = kurbo_to_tinyskia(&path) {
        pixmap.fill_path(
            &sk_path,
            &black_paint(),
            tiny_skia::FillRule::EvenOdd,
            tiny_skia::Transform::identity(),
            None,
        );
    }
    stroke_path(pixmap, &path, FINE_STROKE);
}

fn stroke_path(pixmap: &mut tiny_skia::Pixmap, path: &BezPath, width: f32) {
    let Some(sk_path) = kurbo_to_tinyskia(path) else {
        return;
    };
    let stroke = tiny_skia::Stroke {
        width,
        line_cap: tiny_skia::LineCap::Round,
        line_join: tiny_skia::LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(
        &sk_path,
        &black_paint(),
        &stroke,
        tiny_skia::Transform::identity(),
        None,
    );
}

fn black_paint() -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color(tiny_skia::Color::BLACK);
    paint.anti_alias = false;
    paint
}

// ── Conversions ──────────────────────────────────────────

fn blank_canvas(size: u32) -> Result<tiny_skia::Pixmap, PictogramError> {
    let mut pixmap = tiny_skia::Pixmap::new(size, size).ok_or_else(|| {
        PictogramError::InvalidParameters(format!("cannot allocate a {0}x{0} canvas", size))
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);
    Ok(pixmap)
}

/// Integer canvas coordinates address pixels; strokes run through their centres.
fn pixel_center((x, y): (i32, i32)) -> Point {
    Point::new(x as f64 + 0.5, y as f64 + 0.5)
}

/// Convert (x, y) canvas points to a line-segment BezPath.
fn points_to_path(points: &[(i32, i32)], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    if let Some((&first, rest)) = points.split_first() {
        path.move_to(pixel_center(first));
        for &p in rest {
            path.line_to(pixel_center(p));
        }
        if closed {
            path.push(PathEl::ClosePath);
        }
    }
    path
}

/// Convert a kurbo `BezPath` to a `tiny_skia::Path`.
///
/// Returns `None` for paths tiny-skia considers empty.
fn kurbo_to_tinyskia(bezpath: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for el in bezpath.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Copy an opaque pixmap into an RGB image.
fn to_rgb(pixmap: &tiny_skia::Pixmap) -> RgbImage {
    let width = pixmap.width();
    let pixels = pixmap.pixels();
    RgbImage::from_fn(width, pixmap.height(), |x, y| {
        let color = pixels[(y * width + x) as usize].demultiply();
        image::Rgb([color.red(), color.green(), color.blue()])
    })
}

/// `base * (1 - weight) + overlay * weight`, per channel.
fn blend(base: &RgbImage, overlay: &RgbImage, weight: f32) -> RgbImage {
    RgbImage::from_fn(base.width(), base.height(), |x, y| {
        let b = base.get_pixel(x, y).0;
        let o = overlay.get_pixel(x, y).0;
        let mix = |i: usize| (b[i] as f32 * (1.0 - weight) + o[i] as f32 * weight).round() as u8;
        image::Rgb([mix(0), mix(1), mix(2)])
    })
}

// ── Preview ──────────────────────────────────────────────

/// Largest side of each preview panel's content.
pub const PREVIEW_PANEL: u32 = 400;
const PREVIEW_PADDING: u32 = 20;
const PREVIEW_SEPARATOR: u32 = 2;

/// Downscaled size that fits `max_w` x `max_h`, keeping the aspect ratio.
///
/// Images that already fit are returned unchanged (never upscaled).
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width <= max_w && height <= max_h {
        return (width, height);
    }
    let ratio = (max_w as f64 / width as f64).min(max_h as f64 / height as f64);
    (
        ((width as f64 * ratio) as u32).max(1),
        ((height as f64 * ratio) as u32).max(1),
    )
}

/// Side-by-side comparison: source on the left, pictogram on the right.
pub fn render_comparison(source: &DynamicImage, glyph: &RgbImage) -> RgbImage {
    let panel = PREVIEW_PANEL + PREVIEW_PADDING * 2;
    let total_w = panel * 2 + PREVIEW_SEPARATOR;
    let mut composite = RgbImage::from_pixel(total_w, panel, image::Rgb([200, 200, 200]));

    let panels = [
        (source.to_rgb8(), 0),
        (glyph.clone(), panel + PREVIEW_SEPARATOR),
    ];
    for (content, panel_x) in panels {
        let white = RgbImage::from_pixel(panel, panel, image::Rgb([255, 255, 255]));
        imageops::replace(&mut composite, &white, panel_x as i64, 0);

        let (w, h) = content.dimensions();
        if w == 0 || h == 0 {
            continue;
        }
        let (fit_w, fit_h) = fit_within(w, h, PREVIEW_PANEL, PREVIEW_PANEL);
        let resized = if (fit_w, fit_h) == (w, h) {
            content
        } else {
            imageops::resize(&content, fit_w, fit_h, FilterType::Lanczos3)
        };
        let ox = panel_x + (panel - fit_w) / 2;
        let oy = (panel - fit_h) / 2;
        imageops::replace(&mut composite, &resized, ox as i64, oy as i64);
    }
    composite
}
