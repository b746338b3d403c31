use imageproc::contours::{find_contours, BorderType};

use crate::edges::EdgeMap;
use crate::geom::signed_area;

/// A closed boundary extracted from the edge map, in pixel coordinates.
///
/// Straight runs are stored by their endpoints only; every direction
/// change is kept. The closing edge from the last point back to the first
/// is implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    /// Points in pixel coordinates (y=0 is top of image).
    pub points: Vec<(i32, i32)>,
}

impl Curve {
    pub fn new(points: Vec<(i32, i32)>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed area (absolute shoelace value).
    pub fn area(&self) -> f64 {
        signed_area(&self.points).abs()
    }
}

/// Extract the outermost boundaries of the edge regions.
///
/// Holes and anything nested inside another boundary are skipped.
/// Curves come back in raster-scan discovery order (top-to-bottom,
/// left-to-right).
pub fn outer_curves(edges: &EdgeMap) -> Vec<Curve> {
    find_contours::<i32>(edges.as_image())
        .into_iter()
        .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
        .map(|contour| {
            let points = contour.points.iter().map(|p| (p.x, p.y)).collect();
            Curve::new(compress(points))
        })
        .collect()
}

/// Pick the boundary enclosing the largest area.
///
/// Returns `None` when the edge map holds no boundary at all. Ties keep
/// the curve found first in scan order.
pub fn select(edges: &EdgeMap) -> Option<Curve> {
    let curves = outer_curves(edges);
    tracing::debug!("{} outer curves", curves.len());

    let mut best: Option<(f64, Curve)> = None;
    for curve in curves {
        let area = curve.area();
        match &best {
            Some((best_area, _)) if area <= *best_area => {}
            _ => best = Some((area, curve)),
        }
    }
    best.map(|(area, curve)| {
        tracing::debug!("dominant curve: {} points, area {:.1}", curve.len(), area);
        curve
    })
}

/// Drop points that sit in the middle of a straight run.
///
/// A point is redundant when the step into it and the step out of it
/// point the same way. Reversals (one-pixel spurs) are direction changes
/// and survive.
fn compress(points: Vec<(i32, i32)>) -> Vec<(i32, i32)> {
    let n = points.len();
    if n < 3 {
        return points;
    }
    let kept: Vec<(i32, i32)> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            !continues_straight(prev, points[i], next)
        })
        .map(|i| points[i])
        .collect();
    if kept.is_empty() {
        points
    } else {
        kept
    }
}

fn continues_straight(prev: (i32, i32), cur: (i32, i32), next: (i32, i32)) -> bool {
    let (ax, ay) = (cur.0 - prev.0, cur.1 - prev.1);
    let (bx, by) = (next.0 - cur.0, next.1 - cur.1);
    let cross = ax as i64 * by as i64 - ay as i64 * bx as i64;
    let dot = ax as i64 * bx as i64 + ay as i64 * by as i64;
    cross == 0 && dot > 0
}
