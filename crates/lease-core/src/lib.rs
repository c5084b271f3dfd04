//! Core library for reading residential lease documents.
//!
//! This crate provides:
//! - PDF processing (embedded text, page images) with an OCR fallback
//! - Extractive question answering over the document text
//! - Rule-based normalization of the answers for tenant name, lease duration,
//!   rent amount and property address

pub mod error;
pub mod models;
pub mod pdf;
pub mod ocr;
pub mod qa;
pub mod lease;

pub use error::{LeaseError, Result};
pub use lease::rules::{
    clean_lease_duration, clean_property_address, clean_rent_amount, clean_tenant_name,
};
pub use lease::LeaseReader;
pub use models::config::LeaseConfig;
pub use models::field::{FieldIssue, FieldKind, FieldStatus, NormalizedField, RawAnswer};
pub use models::lease::{FieldOutcome, LeaseRecord, SourceType};
pub use ocr::{ImagePreprocessor, TextBox, TextRecognizer};
pub use pdf::{DocumentText, DocumentTextExtractor, PdfExtractor, PdfProcessor};
pub use qa::QuestionAnswerer;

#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
#[cfg(feature = "native")]
pub use qa::OnnxQaModel;

/// Re-export inference types.
#[cfg(feature = "native")]
pub use lease_inference::{InferenceBackend, InputTensor, OrtBackend, OutputTensor};
