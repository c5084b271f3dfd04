//! Tensor types for inference input/output.

use ndarray::{ArrayD, IxDyn};

use crate::error::InferenceError;

/// Tensor element types used by the transformer models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorType {
    Float32,
    Int64,
}

/// Input tensor for inference.
#[derive(Debug, Clone)]
pub enum InputTensor {
    Float32(ArrayD<f32>),
    Int64(ArrayD<i64>),
}

impl InputTensor {
    /// Get the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        match self {
            InputTensor::Float32(arr) => arr.shape(),
            InputTensor::Int64(arr) => arr.shape(),
        }
    }

    /// Get the data type of the tensor.
    pub fn dtype(&self) -> TensorType {
        match self {
            InputTensor::Float32(_) => TensorType::Float32,
            InputTensor::Int64(_) => TensorType::Int64,
        }
    }

    /// Build an Int64 tensor (token ids, attention masks) from raw data and shape.
    pub fn from_i64(data: Vec<i64>, shape: &[usize]) -> crate::Result<Self> {
        ArrayD::from_shape_vec(IxDyn(shape), data)
            .map(InputTensor::Int64)
            .map_err(|e| InferenceError::InvalidInput(e.to_string()))
    }

    /// Build a Float32 tensor from raw data and shape.
    pub fn from_f32(data: Vec<f32>, shape: &[usize]) -> crate::Result<Self> {
        ArrayD::from_shape_vec(IxDyn(shape), data)
            .map(InputTensor::Float32)
            .map_err(|e| InferenceError::InvalidInput(e.to_string()))
    }
}

/// Output tensor from inference.
#[derive(Debug, Clone)]
pub enum OutputTensor {
    Float32(ArrayD<f32>),
    Int64(ArrayD<i64>),
}

impl OutputTensor {
    /// Get the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        match self {
            OutputTensor::Float32(arr) => arr.shape(),
            OutputTensor::Int64(arr) => arr.shape(),
        }
    }

    /// Get the data type of the tensor.
    pub fn dtype(&self) -> TensorType {
        match self {
            OutputTensor::Float32(_) => TensorType::Float32,
            OutputTensor::Int64(_) => TensorType::Int64,
        }
    }

    /// Try to get the inner Float32 array.
    pub fn as_f32(&self) -> Option<&ArrayD<f32>> {
        match self {
            OutputTensor::Float32(arr) => Some(arr),
            _ => None,
        }
    }

    /// Build a Float32 output from raw data and shape.
    pub fn from_f32(data: Vec<f32>, shape: &[usize]) -> crate::Result<Self> {
        ArrayD::from_shape_vec(IxDyn(shape), data)
            .map(OutputTensor::Float32)
            .map_err(|e| InferenceError::OutputExtraction(e.to_string()))
    }

    /// Flatten a Float32 output (e.g. `[1, seq_len]` logits) into a vector.
    pub fn to_f32_vec(&self) -> Option<Vec<f32>> {
        self.as_f32().map(|arr| arr.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_i64_shape() {
        let tensor = InputTensor::from_i64(vec![0, 1, 2, 3], &[1, 4]).unwrap();
        assert_eq!(tensor.shape(), &[1, 4]);
        assert_eq!(tensor.dtype(), TensorType::Int64);
    }

    #[test]
    fn test_from_i64_shape_mismatch() {
        let err = InputTensor::from_i64(vec![0, 1, 2], &[1, 4]).unwrap_err();
        assert!(matches!(err, InferenceError::InvalidInput(_)));
    }

    #[test]
    fn test_output_flatten() {
        let arr = ArrayD::from_shape_vec(IxDyn(&[1, 3]), vec![0.5f32, 1.5, -2.0]).unwrap();
        let output = OutputTensor::Float32(arr);
        assert_eq!(output.to_f32_vec(), Some(vec![0.5, 1.5, -2.0]));

        let ids = ArrayD::from_shape_vec(IxDyn(&[2]), vec![1i64, 2]).unwrap();
        assert_eq!(OutputTensor::Int64(ids).to_f32_vec(), None);
    }
}
