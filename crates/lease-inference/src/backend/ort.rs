//! ONNX Runtime (ort) backend with the XNNPACK execution provider.

use std::path::Path;
use std::sync::Mutex;

use ndarray::{ArrayD, IxDyn};
use ort::ep::XNNPACK;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::{Session, SessionInputValue};
use ort::value::Tensor;
use tracing::debug;

use crate::error::InferenceError;
use crate::tensor::{InputTensor, OutputTensor};
use crate::{InferenceBackend, Result};

/// Backend using ONNX Runtime for native inference.
pub struct OrtBackend {
    session: Mutex<Session>,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl OrtBackend {
    /// Load a model from a file path using `threads` intra-op threads.
    pub fn from_file<P: AsRef<Path>>(path: P, threads: usize) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading ONNX model from: {}", path.display());

        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, threads)
    }

    /// Load a model from bytes.
    pub fn from_bytes(bytes: &[u8], threads: usize) -> Result<Self> {
        debug!("Loading ONNX model from {} bytes", bytes.len());

        let session = Session::builder()
            .map_err(|e| InferenceError::SessionCreate(e.to_string()))?
            .with_execution_providers([XNNPACK::default().build()])
            .map_err(|e| InferenceError::SessionCreate(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::SessionCreate(e.to_string()))?
            .with_intra_threads(threads.max(1))
            .map_err(|e| InferenceError::SessionCreate(e.to_string()))?
            .commit_from_memory(bytes)
            .map_err(|e| InferenceError::ModelLoad(e.to_string()))?;

        let input_names: Vec<String> = session
            .inputs()
            .iter()
            .map(|i| i.name().to_string())
            .collect();

        let output_names: Vec<String> = session
            .outputs()
            .iter()
            .map(|o| o.name().to_string())
            .collect();

        debug!("Model inputs: {:?}", input_names);
        debug!("Model outputs: {:?}", output_names);

        Ok(Self {
            session: Mutex::new(session),
            input_names,
            output_names,
        })
    }

    fn convert_input(tensor: &InputTensor) -> Result<SessionInputValue<'static>> {
        let shape: Vec<i64> = tensor.shape().iter().map(|&s| s as i64).collect();
        match tensor {
            InputTensor::Float32(arr) => {
                let data: Vec<f32> = arr.iter().copied().collect();
                Tensor::from_array((shape, data))
                    .map(Into::into)
                    .map_err(|e| InferenceError::InvalidInput(e.to_string()))
            }
            InputTensor::Int64(arr) => {
                let data: Vec<i64> = arr.iter().copied().collect();
                Tensor::from_array((shape, data))
                    .map(Into::into)
                    .map_err(|e| InferenceError::InvalidInput(e.to_string()))
            }
        }
    }
}

impl InferenceBackend for OrtBackend {
    fn run(&self, inputs: &[(&str, InputTensor)]) -> Result<Vec<(String, OutputTensor)>> {
        let ort_inputs: Vec<(&str, SessionInputValue<'static>)> = inputs
            .iter()
            .map(|(name, tensor)| Ok((*name, Self::convert_input(tensor)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| InferenceError::InferenceFailed(format!("Failed to lock session: {}", e)))?;

        let outputs = session
            .run(ort_inputs)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let mut results = Vec::with_capacity(outputs.len());

        for (name, value) in outputs.iter() {
            let tensor = if let Ok((shape_ref, data)) = value.try_extract_tensor::<f32>() {
                let shape: Vec<usize> = shape_ref.iter().map(|&s| s as usize).collect();
                let arr = ArrayD::from_shape_vec(IxDyn(&shape), data.to_vec())
                    .map_err(|e| InferenceError::OutputExtraction(e.to_string()))?;
                OutputTensor::Float32(arr)
            } else if let Ok((shape_ref, data)) = value.try_extract_tensor::<i64>() {
                let shape: Vec<usize> = shape_ref.iter().map(|&s| s as usize).collect();
                let arr = ArrayD::from_shape_vec(IxDyn(&shape), data.to_vec())
                    .map_err(|e| InferenceError::OutputExtraction(e.to_string()))?;
                OutputTensor::Int64(arr)
            } else {
                return Err(InferenceError::OutputExtraction(format!(
                    "unsupported output type for '{}'",
                    name
                )));
            };

            results.push((name.to_string(), tensor));
        }

        Ok(results)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}
