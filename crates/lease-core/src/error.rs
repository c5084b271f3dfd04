//! Error types for the lease-core library.
//!
//! Normalizers never fail. PDF, OCR and QA collaborators each have their own
//! error enum; [`LeaseError`] is what the reading pipeline itself returns.

use thiserror::Error;

/// Main error type for the lease library.
#[derive(Error, Debug)]
pub enum LeaseError {
    /// The QA model could not be loaded.
    #[error("QA error: {0}")]
    Qa(#[from] QaError),

    /// Lease field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text detection or recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// No page images were available to recognize.
    #[error("no page images to recognize")]
    NoImages,
}

/// Errors raised while answering a question against document text.
#[derive(Error, Debug)]
pub enum QaError {
    /// Model or tokenizer could not be loaded.
    #[error("failed to load QA model: {0}")]
    ModelLoad(String),

    /// Tokenization of the question/context pair failed.
    #[error("tokenization failed: {0}")]
    Tokenization(String),

    /// Model inference failed.
    #[error("inference failed: {0}")]
    Inference(String),

    /// The context was empty.
    #[error("empty context")]
    EmptyContext,

    /// No answer span could be selected in the context.
    #[error("no answer span found")]
    NoAnswer,
}

/// Errors related to lease field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No text could be read from the document.
    #[error("no text extracted from {0}")]
    NoText(String),
}

/// Result type for the lease library.
pub type Result<T> = std::result::Result<T, LeaseError>;
