//! Image preprocessing for OCR.

use image::{DynamicImage, GrayImage, Luma};
use tracing::trace;

/// Converts page images to black-and-white before recognition.
#[derive(Debug, Clone)]
pub struct ImagePreprocessor {
    /// Gray level below which a pixel becomes black.
    threshold: u8,
}

impl ImagePreprocessor {
    /// Create a preprocessor with the default threshold (128).
    pub fn new() -> Self {
        Self { threshold: 128 }
    }

    /// Set the binarization threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Grayscale then binarize: pixels under the threshold become 0, the rest 255.
    pub fn prepare(&self, image: &DynamicImage) -> DynamicImage {
        let gray = image.to_luma8();
        trace!("Binarizing {}x{} image at {}", gray.width(), gray.height(), self.threshold);

        let binary = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
            let Luma([level]) = *gray.get_pixel(x, y);
            Luma([if level < self.threshold { 0 } else { 255 }])
        });

        DynamicImage::ImageLuma8(binary)
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_binarize_default_threshold() {
        let gray = GrayImage::from_raw(4, 1, vec![0, 127, 128, 255]).unwrap();
        let out = ImagePreprocessor::new().prepare(&DynamicImage::ImageLuma8(gray));

        assert_eq!(out.as_luma8().unwrap().as_raw(), &vec![0, 0, 255, 255]);
    }

    #[test]
    fn test_color_input_becomes_gray() {
        let mut rgb = RgbImage::new(2, 1);
        rgb.put_pixel(0, 0, Rgb([250, 250, 250]));
        rgb.put_pixel(1, 0, Rgb([10, 20, 30]));

        let out = ImagePreprocessor::new().prepare(&DynamicImage::ImageRgb8(rgb));
        assert_eq!(out.as_luma8().unwrap().as_raw(), &vec![255, 0]);
    }

    #[test]
    fn test_custom_threshold() {
        let gray = GrayImage::from_raw(2, 1, vec![150, 210]).unwrap();
        let out = ImagePreprocessor::new()
            .with_threshold(200)
            .prepare(&DynamicImage::ImageLuma8(gray));

        assert_eq!(out.as_luma8().unwrap().as_raw(), &vec![0, 255]);
    }
}
