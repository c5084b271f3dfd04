//! Normalize command - run one answer through a field's rules.

use std::path::Path;

use clap::Args;
use console::style;

use lease_core::FieldKind;

use super::load_config;

/// Arguments for the normalize command.
#[derive(Args)]
pub struct NormalizeArgs {
    /// Field kind (tenant_name, lease_duration, rent_amount, property_address)
    field: FieldKind,

    /// Answer text to normalize
    answer: String,

    /// Model confidence of the answer
    #[arg(long, default_value = "1.0")]
    confidence: f32,

    /// Minimum confidence (default: from config)
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Print the structured result as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: NormalizeArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let min_confidence = args
        .min_confidence
        .unwrap_or(config.extraction.min_confidence);

    let field = args.field.normalize(&args.answer, args.confidence, min_confidence);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&field)?);
        return Ok(());
    }

    let marker = if field.is_accepted() && field.issue.is_none() {
        style("✓").green()
    } else if field.is_accepted() {
        style("!").yellow()
    } else {
        style("✗").red()
    };
    println!("{} {}", marker, field);

    Ok(())
}
