//! OCR fallback for scanned leases.

mod preprocessing;
#[cfg(feature = "native")]
mod engine;

pub use preprocessing::ImagePreprocessor;
#[cfg(feature = "native")]
pub use engine::PureOcrEngine;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Anything that turns a page image into text.
pub trait TextRecognizer {
    /// Recognize the text of one page image, lines in reading order.
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// A recognized line with its quadrilateral bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Corner coordinates (x1, y1, x2, y2, x3, y3, x4, y4).
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Axis-aligned bounding rectangle (min_x, min_y, max_x, max_y).
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Sort boxes top-to-bottom, then left-to-right within 20-pixel rows, and
/// join their text with newlines.
pub fn reading_order_text(boxes: &mut [TextBox]) -> String {
    boxes.sort_by(|a, b| {
        let (ax, ay, _, _) = a.rect();
        let (bx, by, _, _) = b.rect();

        let row_a = (ay / 20.0) as i32;
        let row_b = (by / 20.0) as i32;

        row_a
            .cmp(&row_b)
            .then(ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal))
    });

    boxes
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_box(x: f32, y: f32, text: &str) -> TextBox {
        TextBox {
            bbox: [x, y, x + 50.0, y, x + 50.0, y + 10.0, x, y + 10.0],
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_reading_order() {
        let mut boxes = vec![
            text_box(10.0, 100.0, "Rent: $1,200"),
            text_box(200.0, 12.0, "Agreement"),
            text_box(10.0, 5.0, "Lease"),
        ];

        assert_eq!(reading_order_text(&mut boxes), "Lease\nAgreement\nRent: $1,200");
    }

    #[test]
    fn test_rect() {
        let b = text_box(3.0, 4.0, "x");
        assert_eq!(b.rect(), (3.0, 4.0, 53.0, 14.0));
    }
}
