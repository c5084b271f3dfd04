//! Question-driven lease reader.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::Result;
use crate::error::ExtractionError;
use crate::models::config::{ExtractionConfig, Questions};
use crate::models::field::FieldKind;
use crate::models::lease::{FieldOutcome, LeaseRecord, ReadMetadata, SourceType};
#[cfg(feature = "native")]
use crate::models::config::LeaseConfig;
use crate::pdf::{DocumentText, DocumentTextExtractor};
#[cfg(feature = "native")]
use crate::qa::OnnxQaModel;
use crate::qa::QuestionAnswerer;

/// Characters of document text shown in debug logs.
const PREVIEW_CHARS: usize = 200;

/// Asks one question per field kind and normalizes every answer.
pub struct LeaseReader<Q> {
    answerer: Q,
    questions: Questions,
    min_confidence: f32,
}

impl<Q: QuestionAnswerer> LeaseReader<Q> {
    /// Create a reader with the default questions and a 0.5 confidence floor.
    pub fn new(answerer: Q) -> Self {
        Self::from_config(answerer, &ExtractionConfig::default())
    }

    /// Create a reader using the configured questions and confidence floor.
    pub fn from_config(answerer: Q, config: &ExtractionConfig) -> Self {
        Self {
            answerer,
            questions: config.questions.clone(),
            min_confidence: config.min_confidence,
        }
    }

    /// Set the minimum confidence.
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Read every field from document text, in [`FieldKind::ALL`] order.
    ///
    /// A failing question only fails its own field.
    pub fn read(&self, text: &str) -> Result<Vec<FieldOutcome>> {
        if text.trim().is_empty() {
            return Err(ExtractionError::NoText("input text".to_string()));
        }

        Ok(FieldKind::ALL
            .into_iter()
            .map(|kind| self.read_field(kind, text))
            .collect())
    }

    /// Ask the question for one field and normalize the answer.
    pub fn read_field(&self, kind: FieldKind, text: &str) -> FieldOutcome {
        let question = self.questions.get(kind);
        debug!("Asking for {}: {}", kind, question);

        match self.answerer.answer(question, text) {
            Ok(answer) => {
                let field = kind.normalize_answer(&answer, self.min_confidence);
                debug!(
                    "{}: '{}' ({:.2}) -> {:?}",
                    kind, answer.text, answer.confidence, field.status
                );
                FieldOutcome::Extracted { answer, field }
            }
            Err(e) => {
                warn!("Error extracting {}: {}", kind, e);
                FieldOutcome::Failed {
                    kind,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Read a lease from already extracted text.
    pub fn process_text(&self, text: &str) -> Result<LeaseRecord> {
        let start = Instant::now();
        let fields = self.read(text)?;
        Ok(record(None, SourceType::Text, fields, text, start))
    }

    /// Extract the text of a document and read every field from it.
    pub fn process_document(
        &self,
        path: &Path,
        extractor: &DocumentTextExtractor,
    ) -> crate::Result<LeaseRecord> {
        info!("Processing lease: {}", path.display());
        self.process_extracted(path, extractor.extract(path))
    }

    /// Read every field from text already extracted from `path`.
    pub fn process_extracted(&self, path: &Path, document: DocumentText) -> crate::Result<LeaseRecord> {
        let start = Instant::now();

        if document.text.trim().is_empty() {
            return Err(ExtractionError::NoText(path.display().to_string()).into());
        }

        let preview: String = document.text.chars().take(PREVIEW_CHARS).collect();
        debug!("Extracted text preview: {}", preview);

        let fields = self.read(&document.text)?;
        let record = record(
            Some(path.to_path_buf()),
            document.source_type,
            fields,
            &document.text,
            start,
        );

        info!(
            "Read {} fields from {} in {}ms",
            record.fields.len(),
            path.display(),
            record.metadata.processing_time_ms
        );

        Ok(record)
    }
}

#[cfg(feature = "native")]
impl LeaseReader<OnnxQaModel> {
    /// Load the configured QA model and build a reader around it.
    pub fn load(config: &LeaseConfig) -> crate::Result<Self> {
        let model = OnnxQaModel::from_config(&config.qa)?;
        Ok(Self::from_config(model, &config.extraction))
    }
}

fn record(
    source: Option<PathBuf>,
    source_type: SourceType,
    fields: Vec<FieldOutcome>,
    text: &str,
    start: Instant,
) -> LeaseRecord {
    LeaseRecord {
        source,
        source_type,
        fields,
        metadata: ReadMetadata {
            processed_at: Utc::now(),
            processing_time_ms: start.elapsed().as_millis() as u64,
            text_length: text.chars().count(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LeaseError, QaError};
    use crate::models::config::LeaseConfig;
    use crate::models::field::{FieldIssue, FieldStatus, RawAnswer};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// Answers by field question and records every question asked.
    struct FakeAnswerer {
        asked: RefCell<Vec<String>>,
    }

    impl FakeAnswerer {
        fn new() -> Self {
            Self {
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl QuestionAnswerer for FakeAnswerer {
        fn answer(&self, question: &str, _context: &str) -> std::result::Result<RawAnswer, QaError> {
            self.asked.borrow_mut().push(question.to_string());

            if question == FieldKind::TenantName.default_question() {
                Ok(RawAnswer::new("Jane Roe", 0.92))
            } else if question == FieldKind::LeaseDuration.default_question() {
                Ok(RawAnswer::new("Twelve (12) Months", 0.81))
            } else if question == FieldKind::RentAmount.default_question() {
                Err(QaError::Inference("session poisoned".to_string()))
            } else {
                Ok(RawAnswer::new("Elm", 0.2))
            }
        }
    }

    const LEASE: &str = "This lease is made between ACME Properties (Landlord) and Jane Roe \
        (Tenant) for twelve (12) months at 12 Elm Street.";

    #[test]
    fn test_read_all_fields_in_order() {
        let reader = LeaseReader::new(FakeAnswerer::new());
        let outcomes = reader.read(LEASE).unwrap();

        let kinds: Vec<FieldKind> = outcomes.iter().map(FieldOutcome::kind).collect();
        assert_eq!(kinds, FieldKind::ALL.to_vec());

        let messages: Vec<String> = outcomes.iter().map(FieldOutcome::message).collect();
        assert_eq!(
            messages,
            vec![
                "Jane Roe".to_string(),
                "12 months".to_string(),
                "Error".to_string(),
                "Elm (Low confidence: 0.20)".to_string(),
            ]
        );
    }

    #[test]
    fn test_failed_question_keeps_error() {
        let reader = LeaseReader::new(FakeAnswerer::new());
        let outcome = reader.read_field(FieldKind::RentAmount, LEASE);

        assert_eq!(
            outcome,
            FieldOutcome::Failed {
                kind: FieldKind::RentAmount,
                error: "inference failed: session poisoned".to_string(),
            }
        );
    }

    #[test]
    fn test_min_confidence_override() {
        let reader = LeaseReader::new(FakeAnswerer::new()).with_min_confidence(0.1);
        let outcome = reader.read_field(FieldKind::PropertyAddress, LEASE);
        let field = outcome.field().unwrap();

        assert_eq!(field.status, FieldStatus::Invalid);
        assert_eq!(field.issue, Some(FieldIssue::IncompleteAddress));
    }

    #[test]
    fn test_configured_questions_are_asked() {
        let mut config = ExtractionConfig::default();
        config.questions.tenant_name = "Who rents the unit?".to_string();

        let answerer = FakeAnswerer::new();
        let reader = LeaseReader::from_config(&answerer, &config);
        let outcome = reader.read_field(FieldKind::TenantName, LEASE);

        // The custom question matches none of the fake's defaults
        assert_eq!(outcome.field().unwrap().status, FieldStatus::LowConfidence);
        assert_eq!(answerer.asked.borrow().as_slice(), ["Who rents the unit?"]);
    }

    #[test]
    fn test_empty_text() {
        let reader = LeaseReader::new(FakeAnswerer::new());
        assert!(matches!(reader.read("  \n "), Err(ExtractionError::NoText(_))));
        assert!(reader.process_text("").is_err());
    }

    #[test]
    fn test_process_text_record() {
        let reader = LeaseReader::new(FakeAnswerer::new());
        let record = reader.process_text(LEASE).unwrap();

        assert_eq!(record.source, None);
        assert_eq!(record.source_type, SourceType::Text);
        assert_eq!(record.metadata.text_length, LEASE.chars().count());
        assert_eq!(record.value(FieldKind::TenantName), Some("Jane Roe"));
        assert_eq!(record.issues().len(), 2);
    }

    #[test]
    fn test_process_unreadable_document() {
        let reader = LeaseReader::new(FakeAnswerer::new());
        let extractor = DocumentTextExtractor::new(&LeaseConfig::default());

        let err = reader
            .process_document(Path::new("/nonexistent/lease.pdf"), &extractor)
            .unwrap_err();
        assert!(matches!(err, LeaseError::Extraction(ExtractionError::NoText(p)) if p.contains("lease.pdf")));
    }

    #[test]
    fn test_process_extracted_text() {
        let reader = LeaseReader::new(FakeAnswerer::new());
        let document = DocumentText {
            text: LEASE.to_string(),
            source_type: SourceType::ScannedPdf,
        };

        let record = reader.process_extracted(Path::new("lease.pdf"), document).unwrap();
        assert_eq!(record.source, Some(PathBuf::from("lease.pdf")));
        assert_eq!(record.source_type, SourceType::ScannedPdf);
        assert_eq!(record.value(FieldKind::TenantName), Some("Jane Roe"));
    }

    #[test]
    fn test_process_extracted_blank_text() {
        let reader = LeaseReader::new(FakeAnswerer::new());
        let document = DocumentText {
            text: " \n\t".to_string(),
            source_type: SourceType::Text,
        };

        let err = reader.process_extracted(Path::new("notes.txt"), document).unwrap_err();
        assert_eq!(err.to_string(), "extraction error: no text extracted from notes.txt");
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_load_without_model_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = LeaseConfig::default();
        config.qa.model_dir = dir.path().to_path_buf();

        let err = LeaseReader::load(&config).err().unwrap();
        assert!(matches!(err, LeaseError::Qa(QaError::ModelLoad(ref msg)) if msg.contains("model.onnx")));
    }
}
