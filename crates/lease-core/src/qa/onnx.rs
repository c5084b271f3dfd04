//! Extractive QA with an exported transformer (e.g. RoBERTa fine-tuned on SQuAD 2.0).

use std::time::Instant;

use lease_inference::{InferenceBackend, InputTensor, OrtBackend, OutputTensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use super::span::{self, Window};
use super::QuestionAnswerer;
use crate::error::QaError;
use crate::models::config::QaConfig;
use crate::models::field::RawAnswer;

/// Question answering on an ONNX model with a HuggingFace tokenizer.
pub struct OnnxQaModel<B = OrtBackend> {
    backend: B,
    tokenizer: Tokenizer,
    max_seq_len: usize,
    doc_stride: usize,
    max_answer_len: usize,
}

impl OnnxQaModel<OrtBackend> {
    /// Load `model.onnx` and `tokenizer.json` from the configured directory.
    pub fn from_config(config: &QaConfig) -> Result<Self, QaError> {
        let model_path = config.model_path();
        let tokenizer_path = config.tokenizer_path();

        for path in [&model_path, &tokenizer_path] {
            if !path.exists() {
                return Err(QaError::ModelLoad(format!("missing {}", path.display())));
            }
        }

        let backend = OrtBackend::from_file(&model_path, config.num_threads)
            .map_err(|e| QaError::ModelLoad(e.to_string()))?;
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| QaError::ModelLoad(format!("{}: {}", tokenizer_path.display(), e)))?;

        info!("Loaded QA model from {}", config.model_dir.display());

        Ok(Self::new(backend, tokenizer, config))
    }
}

impl<B: InferenceBackend> OnnxQaModel<B> {
    pub fn new(backend: B, mut tokenizer: Tokenizer, config: &QaConfig) -> Self {
        // Windows are cut from the full encoding, not by the tokenizer.
        if let Err(e) = tokenizer.with_truncation(None) {
            warn!("Failed to disable tokenizer truncation: {}", e);
        }
        tokenizer.with_padding(None);

        Self {
            backend,
            tokenizer,
            max_seq_len: config.max_seq_len,
            doc_stride: config.doc_stride,
            max_answer_len: config.max_answer_len,
        }
    }

    /// Run one window through the model, returning start and end logits.
    fn logits(&self, window: &Window) -> Result<(Vec<f32>, Vec<f32>), QaError> {
        let len = window.input_ids.len();
        let shape = [1, len];

        let mut inputs = Vec::with_capacity(3);
        for name in self.backend.input_names() {
            let data = match name.as_str() {
                "input_ids" => window.input_ids.clone(),
                "attention_mask" => vec![1; len],
                "token_type_ids" => window.type_ids.clone(),
                other => {
                    return Err(QaError::Inference(format!("unsupported model input '{}'", other)))
                }
            };
            let tensor = InputTensor::from_i64(data, &shape)
                .map_err(|e| QaError::Inference(e.to_string()))?;
            inputs.push((name.as_str(), tensor));
        }

        let outputs = self
            .backend
            .run(&inputs)
            .map_err(|e| QaError::Inference(e.to_string()))?;

        let start = output_logits(&outputs, "start_logits", 0)?;
        let end = output_logits(&outputs, "end_logits", 1)?;
        Ok((start, end))
    }
}

/// Find a logits output by name, falling back to its position.
fn output_logits(
    outputs: &[(String, OutputTensor)],
    name: &str,
    position: usize,
) -> Result<Vec<f32>, QaError> {
    outputs
        .iter()
        .find(|(n, _)| n == name)
        .or_else(|| outputs.get(position))
        .and_then(|(_, tensor)| tensor.to_f32_vec())
        .ok_or_else(|| QaError::Inference(format!("model produced no {}", name)))
}

impl<B: InferenceBackend> QuestionAnswerer for OnnxQaModel<B> {
    fn answer(&self, question: &str, context: &str) -> Result<RawAnswer, QaError> {
        if context.trim().is_empty() {
            return Err(QaError::EmptyContext);
        }
        let start_time = Instant::now();

        let encoding = self
            .tokenizer
            .encode((question, context), true)
            .map_err(|e| QaError::Tokenization(e.to_string()))?;

        let windows = span::context_windows(
            encoding.get_ids(),
            encoding.get_type_ids(),
            &encoding.get_sequence_ids(),
            self.max_seq_len,
            self.doc_stride,
        )
        .ok_or_else(|| {
            QaError::Tokenization(format!(
                "no room for context within {} tokens",
                self.max_seq_len
            ))
        })?;

        // (score, first token, last token) in full-encoding indices
        let mut best: Option<(f32, usize, usize)> = None;

        for window in &windows {
            let (start_logits, end_logits) = self.logits(window)?;
            let Some(candidate) = span::best_span(
                &start_logits,
                &end_logits,
                &window.context_mask(),
                self.max_answer_len,
            ) else {
                continue;
            };

            if best.is_none_or(|(score, _, _)| candidate.score > score) {
                if let (Some(first), Some(last)) = (
                    window.token_index[candidate.start],
                    window.token_index[candidate.end],
                ) {
                    best = Some((candidate.score, first, last));
                }
            }
        }

        let (score, first, last) = best.ok_or(QaError::NoAnswer)?;
        let offsets = encoding.get_offsets();
        let text = context
            .get(offsets[first].0..offsets[last].1)
            .ok_or(QaError::NoAnswer)?;

        debug!(
            "Answered '{}' with '{}' ({:.3}) over {} windows in {}ms",
            question,
            text,
            score,
            windows.len(),
            start_time.elapsed().as_millis()
        );

        Ok(RawAnswer::new(text, score))
    }
}
