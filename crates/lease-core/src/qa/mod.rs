//! Extractive question answering over lease text.

pub mod span;
#[cfg(feature = "native")]
mod onnx;

#[cfg(feature = "native")]
pub use onnx::OnnxQaModel;

use crate::error::QaError;
use crate::models::field::RawAnswer;

/// Finds the span of `context` that answers `question`.
pub trait QuestionAnswerer {
    fn answer(&self, question: &str, context: &str) -> Result<RawAnswer, QaError>;
}

impl<T: QuestionAnswerer + ?Sized> QuestionAnswerer for &T {
    fn answer(&self, question: &str, context: &str) -> Result<RawAnswer, QaError> {
        (**self).answer(question, context)
    }
}

impl<T: QuestionAnswerer + ?Sized> QuestionAnswerer for Box<T> {
    fn answer(&self, question: &str, context: &str) -> Result<RawAnswer, QaError> {
        (**self).answer(question, context)
    }
}
