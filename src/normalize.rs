//! Source-to-canvas coordinate mapping.
//!
//! The polygon's bounding box is centred inside the source frame, then
//! x and y are scaled independently onto the canvas. Scaling is not
//! aspect-preserving: a wide photo yields a horizontally squeezed glyph.

use kurbo::Vec2;

use crate::error::PictogramError;
use crate::geom::BoundingBox;

/// Translation (source pixels) followed by per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub offset: Vec2,
    pub scale: Vec2,
}

impl Normalization {
    /// Build the mapping for a polygon with bounding box `bbox`.
    ///
    /// The centring offset is `floor((source - box) / 2) - min`, per axis.
    pub fn new(
        bbox: &BoundingBox,
        source: (u32, u32),
        canvas: (u32, u32),
    ) -> Result<Self, PictogramError> {
        let (source_w, source_h) = source;
        if source_w == 0 || source_h == 0 {
            return Err(PictogramError::InvalidInput(format!(
                "source frame has zero extent ({}x{})",
                source_w, source_h
            )));
        }
        let offset_x = (source_w as i64 - bbox.width() as i64).div_euclid(2) - bbox.x_min as i64;
        let offset_y = (source_h as i64 - bbox.height() as i64).div_euclid(2) - bbox.y_min as i64;
        Ok(Self {
            offset: Vec2::new(offset_x as f64, offset_y as f64),
            scale: Vec2::new(
                canvas.0 as f64 / source_w as f64,
                canvas.1 as f64 / source_h as f64,
            ),
        })
    }

    /// Map one source point, truncating toward zero.
    pub fn apply(&self, (x, y): (i32, i32)) -> (i32, i32) {
        let cx = (x as f64 + self.offset.x) * self.scale.x;
        let cy = (y as f64 + self.offset.y) * self.scale.y;
        (cx as i32, cy as i32)
    }
}

/// Map a polygon's vertices from source space into canvas space.
pub fn to_canvas(
    vertices: &[(i32, i32)],
    source: (u32, u32),
    canvas: (u32, u32),
) -> Result<Vec<(i32, i32)>, PictogramError> {
    let bbox = BoundingBox::of(vertices).ok_or(PictogramError::EmptyPolygon(0))?;
    let mapping = Normalization::new(&bbox, source, canvas)?;
    Ok(vertices.iter().map(|&p| mapping.apply(p)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centred_square_scales_uniformly() {
        let square = [(30, 30), (70, 30), (70, 70), (30, 70)];
        let mapped = to_canvas(&square, (100, 100), (500, 500)).unwrap();
        assert_eq!(mapped, vec![(150, 150), (350, 150), (350, 350), (150, 350)]);
    }

    #[test]
    fn off_centre_polygon_is_recentred() {
        let triangle = [(0, 0), (20, 0), (10, 10)];
        let mapped = to_canvas(&triangle, (100, 100), (100, 100)).unwrap();
        // box 20x10 → offset (40, 45)
        assert_eq!(mapped, vec![(40, 45), (60, 45), (50, 55)]);
    }

    #[test]
    fn axes_scale_independently() {
        let mapping = Normalization::new(
            &BoundingBox {
                x_min: 0,
                y_min: 0,
                x_max: 200,
                y_max: 50,
            },
            (200, 50),
            (500, 500),
        )
        .unwrap();
        assert_eq!(mapping.scale, Vec2::new(2.5, 10.0));
        assert_eq!(mapping.apply((200, 50)), (500, 500));
    }

    #[test]
    fn offset_floors_odd_slack() {
        let bbox = BoundingBox {
            x_min: 5,
            y_min: 5,
            x_max: 10,
            y_max: 10,
        };
        // (11 - 5) / 2 = 3, (12 - 5) / 2 = 3.5 → 3
        let mapping = Normalization::new(&bbox, (11, 12), (11, 12)).unwrap();
        assert_eq!(mapping.offset, Vec2::new(-2.0, -2.0));
    }

    #[test]
    fn fractional_results_truncate() {
        let mapping = Normalization {
            offset: Vec2::ZERO,
            scale: Vec2::new(0.5, 0.5),
        };
        assert_eq!(mapping.apply((3, 5)), (1, 2));
    }

    #[test]
    fn zero_source_is_rejected() {
        assert!(matches!(
            to_canvas(&[(0, 0), (1, 0), (0, 1)], (0, 10), (500, 500)),
            Err(PictogramError::InvalidInput(_))
        ));
    }
}
