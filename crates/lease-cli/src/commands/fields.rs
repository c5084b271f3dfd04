//! Fields command - list what gets extracted.

use std::path::Path;

use console::style;

use lease_core::FieldKind;

use super::load_config;

pub async fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    println!("{}", style("Extracted fields:").bold());
    for kind in FieldKind::ALL {
        println!(
            "  {:<18} {:<18} {}",
            style(kind.id()).cyan(),
            kind.label(),
            config.extraction.questions.get(kind)
        );
    }

    println!();
    println!(
        "Answers below {:.2} confidence are reported as low confidence.",
        config.extraction.min_confidence
    );

    Ok(())
}
