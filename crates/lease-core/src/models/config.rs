//! Configuration structures for the lease reading pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::field::FieldKind;

/// Main configuration for the lease reader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaseConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// OCR fallback configuration.
    pub ocr: OcrConfig,

    /// Question-answering model configuration.
    pub qa: QaConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum trimmed length for embedded text to be used without OCR.
    pub min_text_length: usize,

    /// Maximum pages to OCR (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 1,
            max_pages: 0,
        }
    }
}

/// OCR fallback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Run OCR when a PDF has no embedded text.
    pub enabled: bool,

    /// Directory containing the OCR model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Gray level below which a pixel becomes black during binarization.
    pub binarize_threshold: u8,

    /// Keep `[UNK]` tokens in recognized text instead of replacing them with spaces.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model_dir: PathBuf::from("models/ocr"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            binarize_threshold: 128,
            keep_unk: false,
        }
    }
}

impl OcrConfig {
    /// Whether all model files exist in the model directory.
    pub fn models_present(&self) -> bool {
        [&self.detection_model, &self.recognition_model, &self.dictionary]
            .iter()
            .all(|name| self.model_dir.join(name).exists())
    }
}

/// Extractive question-answering model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    /// Directory containing the exported model and tokenizer.
    pub model_dir: PathBuf,

    /// ONNX model file name.
    pub model: String,

    /// HuggingFace tokenizer file name.
    pub tokenizer: String,

    /// Maximum tokens per window (question + context).
    pub max_seq_len: usize,

    /// Tokens of overlap between consecutive context windows.
    pub doc_stride: usize,

    /// Maximum answer length in tokens.
    pub max_answer_len: usize,

    /// Number of CPU threads for inference.
    pub num_threads: usize,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models/roberta-base-squad2"),
            model: "model.onnx".to_string(),
            tokenizer: "tokenizer.json".to_string(),
            max_seq_len: 384,
            doc_stride: 128,
            max_answer_len: 15,
            num_threads: 4,
        }
    }
}

impl QaConfig {
    /// Full path to the ONNX model.
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model)
    }

    /// Full path to the tokenizer.
    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join(&self.tokenizer)
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum model confidence to trust an answer.
    pub min_confidence: f32,

    /// Question asked for each field.
    pub questions: Questions,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            questions: Questions::default(),
        }
    }
}

/// Question text per field kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Questions {
    pub tenant_name: String,
    pub lease_duration: String,
    pub rent_amount: String,
    pub property_address: String,
}

impl Default for Questions {
    fn default() -> Self {
        Self {
            tenant_name: FieldKind::TenantName.default_question().to_string(),
            lease_duration: FieldKind::LeaseDuration.default_question().to_string(),
            rent_amount: FieldKind::RentAmount.default_question().to_string(),
            property_address: FieldKind::PropertyAddress.default_question().to_string(),
        }
    }
}

impl Questions {
    /// Question for a field kind.
    pub fn get(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::TenantName => &self.tenant_name,
            FieldKind::LeaseDuration => &self.lease_duration,
            FieldKind::RentAmount => &self.rent_amount,
            FieldKind::PropertyAddress => &self.property_address,
        }
    }
}

impl LeaseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = LeaseConfig::default();
        assert_eq!(config.extraction.min_confidence, 0.5);
        assert_eq!(config.ocr.binarize_threshold, 128);
        assert_eq!(
            config.extraction.questions.get(FieldKind::RentAmount),
            "What is the monthly rent amount?"
        );
        assert_eq!(
            config.qa.model_path(),
            PathBuf::from("models/roberta-base-squad2/model.onnx")
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LeaseConfig = serde_json::from_str(
            r#"{"extraction": {"min_confidence": 0.7, "questions": {"tenant_name": "Who rents?"}}}"#,
        )
        .unwrap();

        assert_eq!(config.extraction.min_confidence, 0.7);
        assert_eq!(config.extraction.questions.get(FieldKind::TenantName), "Who rents?");
        assert_eq!(
            config.extraction.questions.get(FieldKind::LeaseDuration),
            "What is the duration of the lease?"
        );
        assert_eq!(config.qa.max_seq_len, 384);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LeaseConfig::default();
        config.pdf.max_pages = 3;
        config.ocr.enabled = false;
        config.save(&path).unwrap();

        let loaded = LeaseConfig::from_file(&path).unwrap();
        assert_eq!(loaded.pdf.max_pages, 3);
        assert!(!loaded.ocr.enabled);
    }

    #[test]
    fn test_invalid_json_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = LeaseConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
