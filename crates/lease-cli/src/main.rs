//! CLI application for reading residential lease documents.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, fields, normalize, process};

/// Lease reader - Extract tenant, term, rent and address from lease PDFs
#[derive(Parser)]
#[command(name = "lease")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the lease fields of a PDF (or plain text) document
    Process(process::ProcessArgs),

    /// Normalize a single answer for a field
    Normalize(normalize::NormalizeArgs),

    /// List the extracted fields and their questions
    Fields,

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Process(args) => process::run(args, config_path).await,
        Commands::Normalize(args) => normalize::run(args, config_path).await,
        Commands::Fields => fields::run(config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
