//! PDF processing: embedded text and page images.

mod document;
mod extractor;

pub use document::{DocumentText, DocumentTextExtractor};
pub use extractor::PdfExtractor;

use crate::error::PdfError;
use image::DynamicImage;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the embedded text of the whole document.
    fn extract_text(&self) -> Result<String>;

    /// Extract the images embedded in a page (1-indexed).
    fn extract_images(&self, page: u32) -> Result<Vec<DynamicImage>>;
}
