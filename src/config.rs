use crate::error::PictogramError;

/// Rendering mode for the simplified silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Closed stroke only.
    #[default]
    Outline,
    /// Solid black region.
    Filled,
    /// Stroke plus random interior strokes, blended and softened.
    Textured,
}

/// All pipeline parameters in one immutable value.
///
/// Built once by the caller (CLI flags, editor sliders) and passed by
/// reference into every stage. Nothing in the pipeline reads ambient state.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleParameters {
    // -- Edge stage --
    /// Hysteresis low threshold. Gradients below this are never edges.
    pub low_threshold: u8,
    /// Hysteresis high threshold. Gradients at or above this are always edges.
    /// Must be >= `low_threshold`.
    pub high_threshold: u8,

    // -- Simplification --
    /// Simplification strength in (0, 1].
    ///
    /// This is a fraction of the contour's closed perimeter, not a pixel
    /// distance: the RDP tolerance is `simplification * perimeter`, measured
    /// in source-image pixels. 0.01 keeps detail, 0.1 collapses most shapes
    /// to a handful of vertices.
    pub simplification: f64,

    // -- Rendering --
    /// Stroke width in canvas pixels.
    pub thickness: u32,
    /// Rendering mode.
    pub style: Style,
    /// Side length of the square output canvas, in pixels.
    pub canvas_size: u32,
}

/// Slider levels are stored as integers in 1..=100 and divided by this.
const SIMPLIFICATION_LEVEL_SCALE: f64 = 1000.0;

impl StyleParameters {
    /// Set the simplification strength from a raw slider level.
    ///
    /// Level 10 corresponds to a strength of 0.01.
    pub fn with_simplification_level(mut self, level: u32) -> Self {
        self.simplification = level as f64 / SIMPLIFICATION_LEVEL_SCALE;
        self
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), PictogramError> {
        if self.low_threshold > self.high_threshold {
            return Err(PictogramError::InvalidParameters(format!(
                "low threshold {} exceeds high threshold {}",
                self.low_threshold, self.high_threshold
            )));
        }
        validate_strength(self.simplification)?;
        if self.thickness == 0 {
            return Err(PictogramError::InvalidParameters(
                "line thickness must be positive".to_string(),
            ));
        }
        if self.canvas_size == 0 {
            return Err(PictogramError::InvalidParameters(
                "canvas size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_strength(strength: f64) -> Result<(), PictogramError> {
    if strength.is_finite() && strength > 0.0 && strength <= 1.0 {
        Ok(())
    } else {
        Err(PictogramError::InvalidParameters(format!(
            "simplification strength {} is outside (0, 1]",
            strength
        )))
    }
}

impl Default for StyleParameters {
    fn default() -> Self {
        Self {
            low_threshold: 50,
            high_threshold: 150,
            simplification: 0.01,
            thickness: 5,
            style: Style::Outline,
            canvas_size: 500,
        }
    }
}
