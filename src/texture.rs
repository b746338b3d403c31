//! Random interior strokes for the textured style.
//!
//! Randomness is injected through [`UniformSource`] so callers (and tests)
//! decide whether the texture is reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::BoundingBox;

/// Number of strokes scattered per glyph.
pub const SEGMENT_COUNT: usize = 50;

/// Maximum per-axis offset from a stroke's start to its end, in canvas pixels.
pub const MAX_SEGMENT_OFFSET: i32 = 30;

/// A source of uniformly distributed integers.
pub trait UniformSource {
    /// Next value in `low..=high`. Implementations must accept `low == high`.
    fn next_in_range(&mut self, low: i32, high: i32) -> i32;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        (**self).next_in_range(low, high)
    }
}

/// [`UniformSource`] backed by a seedable `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    /// Reproducible stream for a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fresh OS-seeded stream.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl UniformSource for SeededSource {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        let (low, high) = (low.min(high), low.max(high));
        self.rng.gen_range(low..=high)
    }
}

/// A single texture stroke in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

/// Scatter [`SEGMENT_COUNT`] short strokes over a bounding box.
///
/// Draw order per stroke is start x, start y, then the x and y offsets.
/// End points are clamped back into the box, so every stroke stays inside
/// the glyph's extent.
pub fn scatter<R: UniformSource + ?Sized>(bbox: &BoundingBox, rng: &mut R) -> Vec<Segment> {
    (0..SEGMENT_COUNT)
        .map(|_| {
            let x1 = rng.next_in_range(bbox.x_min, bbox.x_max);
            let y1 = rng.next_in_range(bbox.y_min, bbox.y_max);
            let dx = rng.next_in_range(-MAX_SEGMENT_OFFSET, MAX_SEGMENT_OFFSET);
            let dy = rng.next_in_range(-MAX_SEGMENT_OFFSET, MAX_SEGMENT_OFFSET);
            Segment {
                start: (x1, y1),
                end: (
                    (x1 + dx).clamp(bbox.x_min, bbox.x_max),
                    (y1 + dy).clamp(bbox.y_min, bbox.y_max),
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always returns the upper bound.
    struct Highest;

    impl UniformSource for Highest {
        fn next_in_range(&mut self, _low: i32, high: i32) -> i32 {
            high
        }
    }

    fn bbox() -> BoundingBox {
        BoundingBox {
            x_min: 100,
            y_min: 120,
            x_max: 300,
            y_max: 260,
        }
    }

    #[test]
    fn scatter_draws_fixed_count() {
        let segments = scatter(&bbox(), &mut SeededSource::new(1));
        assert_eq!(segments.len(), SEGMENT_COUNT);
    }

    #[test]
    fn segments_stay_inside_box() {
        let bbox = bbox();
        for seed in 0..20 {
            for segment in scatter(&bbox, &mut SeededSource::new(seed)) {
                assert!(bbox.contains(segment.start), "{:?}", segment);
                assert!(bbox.contains(segment.end), "{:?}", segment);
                assert!((segment.end.0 - segment.start.0).abs() <= MAX_SEGMENT_OFFSET);
                assert!((segment.end.1 - segment.start.1).abs() <= MAX_SEGMENT_OFFSET);
            }
        }
    }

    #[test]
    fn end_points_are_clamped() {
        let segments = scatter(&bbox(), &mut Highest);
        assert!(segments.iter().all(|s| s.start == (300, 260) && s.end == (300, 260)));
    }

    #[test]
    fn same_seed_same_texture() {
        let a = scatter(&bbox(), &mut SeededSource::new(42));
        let b = scatter(&bbox(), &mut SeededSource::new(42));
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_source_handles_single_value_and_reversed_ranges() {
        let mut rng = SeededSource::new(3);
        assert_eq!(rng.next_in_range(7, 7), 7);
        for _ in 0..100 {
            let v = rng.next_in_range(5, -5);
            assert!((-5..=5).contains(&v));
        }
    }
}
