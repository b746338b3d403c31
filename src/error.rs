use thiserror::Error;

/// Errors that can occur while turning a raster into a pictogram.
///
/// Finding no contour at all is not an error: the pipeline reports it as
/// [`Outcome::NoContour`](crate::Outcome::NoContour) and falls back to the
/// grayscale source.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PictogramError {
    #[error("failed to load image: {0}")]
    ImageLoad(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("simplification left {0} points, a polygon needs at least 3")]
    DegeneratePolygon(usize),

    #[error("cannot render a polygon with {0} points")]
    EmptyPolygon(usize),
}
