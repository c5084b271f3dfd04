//! Document text extraction with OCR fallback.

use std::path::Path;

use tracing::{debug, info, warn};

use super::{PdfExtractor, PdfProcessor};
use crate::error::OcrError;
use crate::models::config::{LeaseConfig, PdfConfig};
use crate::models::lease::SourceType;
use crate::ocr::{ImagePreprocessor, TextRecognizer};

/// Text read from a document, with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentText {
    pub text: String,
    pub source_type: SourceType,
}

impl DocumentText {
    fn empty() -> Self {
        Self {
            text: String::new(),
            source_type: SourceType::Unknown,
        }
    }
}

/// Reads lease text from a PDF: embedded text first, OCR of the page images
/// when the PDF has none.
///
/// Never fails; problems are logged and yield empty text.
pub struct DocumentTextExtractor {
    pdf: PdfConfig,
    ocr_enabled: bool,
    preprocessor: ImagePreprocessor,
    recognizer: Option<Box<dyn TextRecognizer>>,
}

impl DocumentTextExtractor {
    /// Create an extractor without an OCR recognizer attached.
    pub fn new(config: &LeaseConfig) -> Self {
        Self {
            pdf: config.pdf.clone(),
            ocr_enabled: config.ocr.enabled,
            preprocessor: ImagePreprocessor::new().with_threshold(config.ocr.binarize_threshold),
            recognizer: None,
        }
    }

    /// Attach the recognizer used for scanned documents.
    pub fn with_recognizer(mut self, recognizer: Box<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Disable the OCR fallback.
    pub fn text_only(mut self) -> Self {
        self.ocr_enabled = false;
        self
    }

    /// Extract the text of a document, or an empty string on failure.
    pub fn extract_text(&self, path: &Path) -> String {
        self.extract(path).text
    }

    /// Extract the text of a document along with its source type.
    pub fn extract(&self, path: &Path) -> DocumentText {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return DocumentText::empty();
            }
        };
        self.extract_from_bytes(&data, &path.display().to_string())
    }

    /// Extract text from PDF bytes. `name` is only used in log messages.
    pub fn extract_from_bytes(&self, data: &[u8], name: &str) -> DocumentText {
        let mut pdf = PdfExtractor::new();
        if let Err(e) = pdf.load(data) {
            warn!("Failed to load PDF {}: {}", name, e);
            return DocumentText::empty();
        }

        match pdf.extract_text() {
            Ok(text) if self.has_enough_text(&text) => {
                debug!("Using embedded text of {} ({} chars)", name, text.len());
                return DocumentText {
                    text,
                    source_type: SourceType::TextPdf,
                };
            }
            Ok(_) => debug!("{} has no usable embedded text", name),
            Err(e) => warn!("Text extraction failed for {}: {}", name, e),
        }

        if !self.ocr_enabled {
            info!("OCR disabled, no text for {}", name);
            return DocumentText::empty();
        }

        match self.ocr_pages(&pdf) {
            Ok(text) if !text.trim().is_empty() => DocumentText {
                text,
                source_type: SourceType::ScannedPdf,
            },
            Ok(_) => {
                warn!("OCR found no text in {}", name);
                DocumentText::empty()
            }
            Err(e) => {
                warn!("OCR failed for {}: {}", name, e);
                DocumentText::empty()
            }
        }
    }

    fn has_enough_text(&self, text: &str) -> bool {
        let length = text.trim().chars().count();
        length > 0 && length >= self.pdf.min_text_length
    }

    /// Recognize the embedded images of each page, one line block per image.
    fn ocr_pages(&self, pdf: &PdfExtractor) -> Result<String, OcrError> {
        let recognizer = self
            .recognizer
            .as_ref()
            .ok_or_else(|| OcrError::ModelLoad("no OCR recognizer configured".to_string()))?;

        let mut pages = pdf.page_count();
        if self.pdf.max_pages > 0 {
            pages = pages.min(self.pdf.max_pages as u32);
        }

        let mut text = String::new();
        let mut image_count = 0;

        for page in 1..=pages {
            let images = match pdf.extract_images(page) {
                Ok(images) => images,
                Err(e) => {
                    warn!("Failed to extract images from page {}: {}", page, e);
                    continue;
                }
            };

            for image in images {
                image_count += 1;
                let prepared = self.preprocessor.prepare(&image);
                let page_text = recognizer.recognize(&prepared)?;
                text.push_str(&page_text);
                text.push('\n');
            }
        }

        if image_count == 0 {
            return Err(OcrError::NoImages);
        }

        debug!("OCR processed {} images on {} pages", image_count, pages);
        Ok(text)
    }
}
