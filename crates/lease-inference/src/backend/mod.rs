//! Inference backend implementations.

#[cfg(feature = "native")]
pub mod ort;

use crate::{InputTensor, OutputTensor, Result};

/// Trait for ONNX inference backends.
///
/// Callers hand over named inputs and get named outputs back, so model code
/// can be exercised with a stub backend in tests.
pub trait InferenceBackend: Send + Sync {
    /// Run inference with the given named inputs.
    fn run(&self, inputs: &[(&str, InputTensor)]) -> Result<Vec<(String, OutputTensor)>>;

    /// Get the input names expected by the model.
    fn input_names(&self) -> &[String];

    /// Get the output names produced by the model.
    fn output_names(&self) -> &[String];
}
