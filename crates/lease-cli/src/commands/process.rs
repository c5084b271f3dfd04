//! Process command - read the fields of a single lease.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use lease_core::{
    DocumentText, DocumentTextExtractor, FieldOutcome, LeaseConfig, LeaseReader, LeaseRecord,
    PureOcrEngine, SourceType,
};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Minimum answer confidence (default: from config)
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Skip OCR and use only embedded PDF text
    #[arg(long)]
    text_only: bool,

    /// Directory with the QA model.onnx and tokenizer.json
    #[arg(long)]
    qa_model_dir: Option<PathBuf>,

    /// Directory with the OCR detection/recognition models
    #[arg(long)]
    ocr_model_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per field
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, &args);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Extracting document text...");
    let document = match extension.as_str() {
        "pdf" => build_extractor(&config, args.text_only).extract(&args.input),
        "txt" => DocumentText {
            text: fs::read_to_string(&args.input)?,
            source_type: SourceType::Text,
        },
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    if document.text.trim().is_empty() {
        anyhow::bail!("No text extracted from {}", args.input.display());
    }

    pb.set_message("Loading QA model...");
    let reader = LeaseReader::load(&config).map_err(|e| {
        anyhow::anyhow!(
            "{}\n\nExport a SQuAD 2.0 model to ONNX into {} or pass --qa-model-dir.",
            e,
            config.qa.model_dir.display()
        )
    })?;

    pb.set_message("Answering field questions...");
    let record = reader.process_extracted(&args.input, document)?;

    pb.finish_and_clear();

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let issues = record.issues();
    if !issues.is_empty() {
        eprintln!("{}", style("Fields needing review:").yellow());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn apply_overrides(config: &mut LeaseConfig, args: &ProcessArgs) {
    if let Some(min_confidence) = args.min_confidence {
        config.extraction.min_confidence = min_confidence;
    }
    if let Some(dir) = &args.qa_model_dir {
        config.qa.model_dir = dir.clone();
    }
    if let Some(dir) = &args.ocr_model_dir {
        config.ocr.model_dir = dir.clone();
    }
    if args.text_only {
        config.ocr.enabled = false;
    }
}

/// Text extractor with the OCR engine attached when its models are available.
fn build_extractor(config: &LeaseConfig, text_only: bool) -> DocumentTextExtractor {
    let extractor = DocumentTextExtractor::new(config);
    if text_only || !config.ocr.enabled {
        return extractor.text_only();
    }

    if !config.ocr.models_present() {
        warn!(
            "OCR models not found at {}, scanned PDFs will yield no text",
            config.ocr.model_dir.display()
        );
        return extractor;
    }

    match PureOcrEngine::from_config(&config.ocr) {
        Ok(engine) => extractor.with_recognizer(Box::new(engine)),
        Err(e) => {
            warn!("Failed to load OCR engine: {}", e);
            extractor
        }
    }
}

fn format_record(record: &LeaseRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &LeaseRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["source", "field", "value", "status", "message", "confidence"])?;

    let source = record
        .source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    for outcome in &record.fields {
        let (value, status, confidence) = match outcome {
            FieldOutcome::Extracted { answer, field } => (
                field.value.clone(),
                serde_json::to_value(field.status)?
                    .as_str()
                    .unwrap_or_default()
                    .to_string(),
                format!("{:.4}", answer.confidence),
            ),
            FieldOutcome::Failed { .. } => (String::new(), "error".to_string(), String::new()),
        };

        wtr.write_record([
            source.as_str(),
            outcome.kind().id(),
            value.as_str(),
            status.as_str(),
            outcome.message().as_str(),
            confidence.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &LeaseRecord) -> String {
    let mut output = String::new();

    if let Some(source) = &record.source {
        output.push_str(&format!("Lease: {}\n", source.display()));
    }
    output.push_str(&format!("Source: {:?}\n\n", record.source_type));

    for outcome in &record.fields {
        output.push_str(&format!("{:<18} {}\n", format!("{}:", outcome.kind()), outcome));
    }

    output.push_str(&format!(
        "\nProcessed {} characters in {}ms\n",
        record.metadata.text_length, record.metadata.processing_time_ms
    ));

    output
}
