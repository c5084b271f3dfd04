//! Lease field reading: ask a question per field, normalize each answer.

mod reader;
pub mod rules;

pub use reader::LeaseReader;

use crate::error::ExtractionError;

/// Result type for reading operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
