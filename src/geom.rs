//! Shared geometry utilities on integer pixel points.

/// Signed area of a closed point ring via the shoelace formula.
///
/// Positive = counter-clockwise in a y-up frame. Fewer than 3 points
/// enclose nothing.
pub fn signed_area(points: &[(i32, i32)]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: i64 = (0..n)
        .map(|i| {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % n];
            x0 as i64 * y1 as i64 - x1 as i64 * y0 as i64
        })
        .sum();
    twice as f64 / 2.0
}

/// Axis-aligned integer bounding box, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl BoundingBox {
    /// `None` for an empty point set.
    pub fn of(points: &[(i32, i32)]) -> Option<Self> {
        let (&(x, y), rest) = points.split_first()?;
        let mut bbox = BoundingBox {
            x_min: x,
            y_min: y,
            x_max: x,
            y_max: y,
        };
        for &(x, y) in rest {
            bbox.x_min = bbox.x_min.min(x);
            bbox.y_min = bbox.y_min.min(y);
            bbox.x_max = bbox.x_max.max(x);
            bbox.y_max = bbox.y_max.max(y);
        }
        Some(bbox)
    }

    /// Span in x (`x_max - x_min`); zero for a vertical line.
    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    /// Span in y (`y_max - y_min`).
    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, (x, y): (i32, i32)) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}
