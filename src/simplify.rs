//! Curve simplification: closed boundary → polygon.
//!
//! The tolerance is relative: ε = strength × closed perimeter, in source
//! pixels. The ring is handed to RDP closed (first point repeated at the
//! end) so the closing edge takes part in the simplification, and the
//! repeated point is dropped again afterwards.

use geo::{Coord, EuclideanLength, LineString, Simplify};

use crate::config::validate_strength;
use crate::contour::Curve;
use crate::error::PictogramError;

/// A simplified closed polygon with at least 3 vertices.
///
/// The first and last vertices are distinct; the closing edge is implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    pub vertices: Vec<(i32, i32)>,
}

impl Polygon {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Simplify a curve with RDP at tolerance `strength * perimeter`.
///
/// Fails with `DegeneratePolygon` when fewer than 3 vertices survive;
/// callers can retry with a lower strength.
pub fn simplify(curve: &Curve, strength: f64) -> Result<Polygon, PictogramError> {
    validate_strength(strength)?;

    let ring = closed_ring(&curve.points);
    let epsilon = strength * ring.euclidean_length();
    let mut vertices = rdp_simplify(&ring, epsilon);

    // Drop the repeated closing point.
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    vertices.dedup();

    if vertices.len() < 3 {
        return Err(PictogramError::DegeneratePolygon(vertices.len()));
    }
    tracing::debug!(
        "simplified {} → {} points (ε = {:.2} px)",
        curve.len(),
        vertices.len(),
        epsilon
    );
    Ok(Polygon { vertices })
}

/// Closed perimeter of a curve in pixels.
pub fn perimeter(curve: &Curve) -> f64 {
    closed_ring(&curve.points).euclidean_length()
}

fn closed_ring(points: &[(i32, i32)]) -> LineString<f64> {
    let mut coords: Vec<Coord<f64>> = points
        .iter()
        .map(|&(x, y)| Coord {
            x: x as f64,
            y: y as f64,
        })
        .collect();
    if let Some(&first) = coords.first() {
        coords.push(first);
    }
    LineString::new(coords)
}

/// RDP polyline simplification. Kept vertices are original lattice points,
/// so rounding back to integers is exact.
fn rdp_simplify(ring: &LineString<f64>, epsilon: f64) -> Vec<(i32, i32)> {
    let simplified = if ring.0.len() <= 2 || epsilon <= 0.0 {
        ring.clone()
    } else {
        ring.simplify(&epsilon)
    };
    simplified
        .into_inner()
        .into_iter()
        .map(|c| (c.x.round() as i32, c.y.round() as i32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn square_with_edge_points(side: i32) -> Curve {
        let mut points = Vec::new();
        for x in 0..side {
            points.push((x, 0));
        }
        for y in 0..side {
            points.push((side, y));
        }
        for x in (1..=side).rev() {
            points.push((x, side));
        }
        for y in (1..=side).rev() {
            points.push((0, y));
        }
        Curve::new(points)
    }

    #[test]
    fn square_reduces_to_four_corners() {
        let polygon = simplify(&square_with_edge_points(20), 0.05).unwrap();
        let mut vertices = polygon.vertices.clone();
        vertices.sort_unstable();
        assert_eq!(vertices, vec![(0, 0), (0, 20), (20, 0), (20, 20)]);
    }

    #[test]
    fn two_point_curve_is_degenerate() {
        let curve = Curve::new(vec![(0, 0), (10, 5)]);
        for strength in [1e-9, 0.01, 1.0] {
            match simplify(&curve, strength) {
                Err(PictogramError::DegeneratePolygon(n)) => assert!(n < 3),
                other => panic!("expected DegeneratePolygon, got {:?}", other),
            }
        }
    }

    #[test]
    fn collinear_curve_is_degenerate() {
        let curve = Curve::new(vec![(0, 0), (5, 5), (10, 10)]);
        assert!(matches!(
            simplify(&curve, 0.001),
            Err(PictogramError::DegeneratePolygon(_))
        ));
    }

    #[test]
    fn invalid_strength_is_rejected() {
        let curve = square_with_edge_points(10);
        assert!(matches!(
            simplify(&curve, 0.0),
            Err(PictogramError::InvalidParameters(_))
        ));
        assert!(simplify(&curve, 1.01).is_err());
    }

    #[test]
    fn tiny_strength_keeps_shape_and_never_grows() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            // Star-shaped rings around the origin: angles increase, so the
            // ring never collapses onto a line.
            let n = rng.gen_range(3..40);
            let points: Vec<(i32, i32)> = (0..n)
                .map(|i| {
                    let angle = i as f64 / n as f64 * std::f64::consts::TAU;
                    let radius = rng.gen_range(20.0..60.0);
                    (
                        (angle.cos() * radius).round() as i32,
                        (angle.sin() * radius).round() as i32,
                    )
                })
                .collect();
            let curve = Curve::new(points);
            let polygon = simplify(&curve, 1e-6).unwrap();
            assert!(polygon.len() >= 3);
            assert!(
                polygon.len() <= curve.len(),
                "{} vertices from a {}-point curve",
                polygon.len(),
                curve.len()
            );
        }
    }

    #[test]
    fn stronger_simplification_keeps_fewer_points() {
        let points: Vec<(i32, i32)> = (0..64)
            .map(|i| {
                let angle = i as f64 / 64.0 * std::f64::consts::TAU;
                let radius = if i % 2 == 0 { 50.0 } else { 46.0 };
                (
                    (angle.cos() * radius).round() as i32,
                    (angle.sin() * radius).round() as i32,
                )
            })
            .collect();
        let curve = Curve::new(points);
        let fine = simplify(&curve, 0.001).unwrap();
        let coarse = simplify(&curve, 0.05).unwrap();
        assert!(coarse.len() < fine.len());
        assert!(coarse.len() >= 3);
    }

    #[test]
    fn first_and_last_vertices_differ() {
        let polygon = simplify(&square_with_edge_points(12), 0.01).unwrap();
        assert_ne!(polygon.vertices.first(), polygon.vertices.last());
    }

    #[test]
    fn perimeter_includes_closing_edge() {
        let curve = Curve::new(vec![(0, 0), (3, 0), (3, 4)]);
        assert!((perimeter(&curve) - 12.0).abs() < 1e-9);
    }
}
