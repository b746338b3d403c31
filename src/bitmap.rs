use std::path::Path;

use image::{DynamicImage, GrayImage, ImageReader, RgbImage};

use crate::error::PictogramError;

/// Decode an image file. Format detection is left to the `image` crate.
pub fn load(path: &Path) -> Result<DynamicImage, PictogramError> {
    ImageReader::open(path)
        .map_err(|e| PictogramError::ImageLoad(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| PictogramError::ImageLoad(e.to_string()))?
        .decode()
        .map_err(|e| PictogramError::ImageLoad(e.to_string()))
}

/// Convert a raster to 8-bit grayscale, rejecting empty images.
pub fn to_grayscale(raster: &DynamicImage) -> Result<GrayImage, PictogramError> {
    let (w, h) = (raster.width(), raster.height());
    if w == 0 || h == 0 {
        return Err(PictogramError::InvalidInput(format!(
            "raster has zero extent ({}x{})",
            w, h
        )));
    }
    Ok(raster.to_luma8())
}

/// The no-contour result: the grayscale source re-encoded as RGB.
pub fn grayscale_as_rgb(gray: &GrayImage) -> RgbImage {
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        let luma = gray.get_pixel(x, y).0[0];
        image::Rgb([luma, luma, luma])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_raster_is_invalid() {
        let raster = DynamicImage::new_luma8(0, 12);
        assert!(matches!(
            to_grayscale(&raster),
            Err(PictogramError::InvalidInput(_))
        ));
        let raster = DynamicImage::new_rgb8(12, 0);
        assert!(to_grayscale(&raster).is_err());
    }

    #[test]
    fn grayscale_round_trips_to_equal_channels() {
        let gray = GrayImage::from_fn(4, 3, |x, y| image::Luma([(x * 40 + y * 10) as u8]));
        let rgb = grayscale_as_rgb(&gray);
        assert_eq!(rgb.dimensions(), (4, 3));
        for (x, y, p) in rgb.enumerate_pixels() {
            let luma = gray.get_pixel(x, y).0[0];
            assert_eq!(p.0, [luma, luma, luma]);
        }
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, PictogramError::ImageLoad(_)));
    }
}
