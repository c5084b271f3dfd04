//! ONNX inference abstraction layer for lease-reader.
//!
//! Exposes a backend-neutral [`InferenceBackend`] trait with owned tensor
//! types, and an ONNX Runtime implementation (`OrtBackend`) behind the
//! `native` feature. The question-answering model in `lease-core` runs on top
//! of this crate.

mod backend;
mod error;
mod tensor;

pub use backend::InferenceBackend;
pub use error::InferenceError;
pub use tensor::{InputTensor, OutputTensor, TensorType};

#[cfg(feature = "native")]
pub use backend::ort::OrtBackend;

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
